use erdsketch::geometry::{Measurer, Point, Rect, Segment, Vec2};
use erdsketch::model::{EntityId, Fill, ItemFlags, ItemRef};
use erdsketch::{AppConfig, AppContext, Canvas};

/// Fixed advance per character, fixed line height.
struct CharMeasurer;
impl Measurer for CharMeasurer {
    fn measure(&self, text: &str) -> (f32, f32) {
        (text.chars().count() as f32 * 6.0, 14.0)
    }
}

fn canvas() -> Canvas {
    Canvas::new(&AppContext::new(AppConfig::default()).unwrap())
}

#[test]
fn entity_attribute_and_unique_toggle_scenario() {
    let mut c = canvas();
    let e1 = c.add_entity_at(Point::new(100.0, 100.0), &CharMeasurer);
    assert_eq!(c.selected_entity(), Some(e1));

    let a1 = c.add_attribute_to_selection().unwrap();
    let attr = c.diagram().attribute(a1).unwrap();
    assert_eq!(attr.name, "attribute1");
    assert_eq!(attr.owner, e1);
    assert_eq!(attr.center, Point::new(160.0, 200.0));
    assert_eq!(
        attr.connector,
        Segment::new(Point::new(160.0, 200.0), Point::new(160.0, 160.0))
    );
    assert_eq!(attr.fill(), Fill::White);
    assert!(!attr.unique);

    assert_eq!(c.click_attribute(a1), Some(true));
    assert_eq!(c.diagram().attribute(a1).unwrap().fill(), Fill::Black);
    assert_eq!(c.click_attribute(a1), Some(false));
    assert_eq!(c.diagram().attribute(a1).unwrap().fill(), Fill::White);
}

#[test]
fn new_entity_gets_default_name_and_centered_label() {
    let mut c = canvas();
    let id = c.add_entity_at(Point::new(10.0, 20.0), &CharMeasurer);
    let e = c.diagram().entity(id).unwrap();
    assert_eq!(e.name, "New Entity");
    assert_eq!(e.size, Vec2::new(120.0, 60.0));
    // "New Entity" is 10 chars -> 60 wide
    assert_eq!(e.label_position(), Point::new(10.0 + 30.0, 20.0 + 23.0));
}

#[test]
fn viewport_center_places_entity_top_left() {
    let mut c = canvas();
    assert_eq!(c.viewport().center(), Point::new(400.0, 300.0));
    c.set_viewport(Rect::from_min_size(Point::ORIGIN, Vec2::new(1000.0, 500.0)));
    let id = c.add_entity_at_viewport_center(&CharMeasurer);
    assert_eq!(c.diagram().entity(id).unwrap().position, Point::new(500.0, 250.0));
}

#[test]
fn add_attribute_without_selection_is_noop() {
    let mut c = canvas();
    assert_eq!(c.add_attribute_to_selection(), None);
    assert_eq!(c.diagram().attribute_count(), 0);
}

#[test]
fn attributes_go_to_clicked_entity() {
    let mut c = canvas();
    let e1 = c.add_entity_at(Point::new(0.0, 0.0), &CharMeasurer);
    let e2 = c.add_entity_at(Point::new(300.0, 0.0), &CharMeasurer);
    c.add_attribute_to_selection().unwrap();
    c.add_attribute_to_selection().unwrap();

    c.click_entity(e1);
    let a = c.add_attribute_to_selection().unwrap();
    assert_eq!(c.diagram().attribute(a).unwrap().name, "attribute1");
    assert_eq!(c.diagram().entity(e1).unwrap().attributes, vec![a]);
    assert_eq!(c.diagram().entity(e2).unwrap().attributes.len(), 2);
}

#[test]
fn attribute_offset_follows_config() {
    let config = AppConfig {
        attribute_offset: Vec2::new(-20.0, 80.0),
        attribute_prefix: "col".to_string(),
        ..Default::default()
    };
    let mut c = Canvas::new(&AppContext::new(config).unwrap());
    c.add_entity_at(Point::new(50.0, 50.0), &CharMeasurer);
    let a = c.add_attribute_to_selection().unwrap();
    let attr = c.diagram().attribute(a).unwrap();
    assert_eq!(attr.name, "col1");
    assert_eq!(attr.center, Point::new(30.0, 130.0));
}

#[test]
fn attributes_are_hit_above_entities() {
    let mut c = canvas();
    let e = c.add_entity_at(Point::new(0.0, 0.0), &CharMeasurer);
    c.click_entity(e);
    let a = c.add_attribute_to_selection().unwrap();
    // Move the attribute onto the entity body.
    c.drag_item(ItemRef::Attribute(a), Vec2::new(0.0, -70.0));
    assert_eq!(c.item_at(Point::new(60.0, 30.0)), Some(ItemRef::Attribute(a)));
    assert_eq!(c.item_at(Point::new(5.0, 5.0)), Some(ItemRef::Entity(e)));
    assert_eq!(c.item_at(Point::new(500.0, 500.0)), None);
}

#[test]
fn unknown_ids_are_ignored() {
    use erdsketch::model::AttributeId;
    let mut c = canvas();
    c.click_entity(EntityId(3));
    assert_eq!(c.selected_entity(), None);
    assert_eq!(c.click_attribute(AttributeId(0)), None);
    c.begin_rename(EntityId(0));
    assert!(c.rename_editor().is_none());
}

fn assert_connectors_attached(c: &Canvas) {
    for (_, attr) in c.diagram().attributes() {
        let owner = c.diagram().entity(attr.owner).unwrap();
        assert_eq!(attr.connector.start, attr.center);
        assert_eq!(attr.connector.end, owner.base_center());
    }
}

#[test]
fn every_canvas_mutation_leaves_connectors_attached() {
    let mut c = canvas();
    let e1 = c.add_entity_at(Point::new(0.0, 0.0), &CharMeasurer);
    let a1 = c.add_attribute_to_selection().unwrap();
    c.add_attribute_to_selection().unwrap();
    let e2 = c.add_entity_at(Point::new(300.0, 0.0), &CharMeasurer);
    c.add_attribute_to_selection().unwrap();
    assert_connectors_attached(&c);

    c.drag_item(ItemRef::Entity(e1), Vec2::new(300.0, 300.0));
    assert_eq!(c.diagram().entity(e1).unwrap().position, Point::new(300.0, 300.0));
    assert_connectors_attached(&c);

    c.drag_item(ItemRef::Attribute(a1), Vec2::new(-15.0, 40.0));
    assert_connectors_attached(&c);

    c.press_item(ItemRef::Entity(e1), false);
    c.press_item(ItemRef::Entity(e2), true);
    c.drag_item(ItemRef::Entity(e2), Vec2::new(7.0, -3.0));
    assert_connectors_attached(&c);

    c.begin_rename(e1);
    c.rename_editor_mut().unwrap().text = "Customer".to_string();
    c.finish_rename(&CharMeasurer);
    assert_connectors_attached(&c);

    let pinned = ItemFlags {
        movable: false,
        selectable: true,
    };
    assert!(c.set_item_flags(ItemRef::Entity(e2), pinned));
    c.drag_item(ItemRef::Entity(e1), Vec2::new(1.0, 1.0));
    assert_eq!(c.diagram().entity(e2).unwrap().position, Point::new(307.0, -3.0));
    assert_connectors_attached(&c);
}

#[test]
fn unselectable_items_lose_their_marks() {
    let mut c = canvas();
    let e1 = c.add_entity_at(Point::new(0.0, 0.0), &CharMeasurer);
    let e2 = c.add_entity_at(Point::new(300.0, 0.0), &CharMeasurer);
    c.press_item(ItemRef::Entity(e1), false);
    c.press_item(ItemRef::Entity(e2), true);

    let hidden = ItemFlags {
        movable: true,
        selectable: false,
    };
    assert!(c.set_item_flags(ItemRef::Entity(e2), hidden));
    assert_eq!(c.selection.marked, vec![ItemRef::Entity(e1)]);
    assert_eq!(c.diagram().flags(ItemRef::Entity(e2)), Some(hidden));
    assert!(!c.set_item_flags(ItemRef::Entity(EntityId(9)), hidden));
}
