use erdsketch::geometry::{Measurer, Point, Vec2};
use erdsketch::model::{EntityId, ItemRef};
use erdsketch::{AppConfig, AppContext, Canvas};
use proptest::prelude::*;

struct CharMeasurer;
impl Measurer for CharMeasurer {
    fn measure(&self, text: &str) -> (f32, f32) {
        (text.chars().count() as f32 * 6.0, 14.0)
    }
}

fn canvas() -> Canvas {
    Canvas::new(&AppContext::new(AppConfig::default()).unwrap())
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-500i16..500, -500i16..500).prop_map(|(x, y)| Point::new(x as f32, y as f32))
}

fn arb_delta() -> impl Strategy<Value = Vec2> {
    (-50i8..50, -50i8..50).prop_map(|(x, y)| Vec2::new(x as f32, y as f32))
}

fn assert_connectors_attached(c: &Canvas) {
    for (_, attr) in c.diagram().attributes() {
        let owner = c.diagram().entity(attr.owner).unwrap();
        assert_eq!(attr.connector.start, attr.center);
        assert_eq!(attr.connector.end, owner.base_center());
    }
}

proptest! {
    #[test]
    fn new_entity_is_always_selected(points in prop::collection::vec(arb_point(), 1..20)) {
        let mut c = canvas();
        for p in points {
            let id = c.add_entity_at(p, &CharMeasurer);
            prop_assert_eq!(c.selected_entity(), Some(id));
            prop_assert_eq!(c.diagram().entity(id).unwrap().position, p);
        }
    }

    #[test]
    fn attribute_names_count_owner_attributes(
        picks in prop::collection::vec(0usize..4, 1..30),
    ) {
        let mut c = canvas();
        for i in 0..4 {
            c.add_entity_at(Point::new(i as f32 * 200.0, 0.0), &CharMeasurer);
        }
        for pick in picks {
            let owner = EntityId(pick);
            c.click_entity(owner);
            let k = c.diagram().entity(owner).unwrap().attributes.len();
            let id = c.add_attribute_to_selection().unwrap();
            let expected = format!("attribute{}", k + 1);
            prop_assert_eq!(&c.diagram().attribute(id).unwrap().name, &expected);
            prop_assert_eq!(c.diagram().attribute(id).unwrap().owner, owner);
        }
    }

    #[test]
    fn connectors_follow_every_drag(
        drags in prop::collection::vec((any::<bool>(), 0usize..3, arb_delta()), 1..40),
    ) {
        let mut c = canvas();
        let e1 = c.add_entity_at(Point::new(0.0, 0.0), &CharMeasurer);
        let a1 = c.add_attribute_to_selection().unwrap();
        let a2 = c.add_attribute_to_selection().unwrap();
        let e2 = c.add_entity_at(Point::new(300.0, 0.0), &CharMeasurer);
        let a3 = c.add_attribute_to_selection().unwrap();
        let attrs = [a1, a2, a3];
        let entities = [e1, e2, e1];
        for (on_entity, idx, delta) in drags {
            let item = if on_entity {
                ItemRef::Entity(entities[idx])
            } else {
                ItemRef::Attribute(attrs[idx])
            };
            c.drag_item(item, delta);
            assert_connectors_attached(&c);
        }
    }

    #[test]
    fn at_most_one_editor_and_only_last_commits(
        targets in prop::collection::vec(0usize..3, 1..10),
    ) {
        let mut c = canvas();
        for i in 0..3 {
            c.add_entity_at(Point::new(i as f32 * 200.0, 0.0), &CharMeasurer);
        }
        for (n, t) in targets.iter().enumerate() {
            c.begin_rename(EntityId(*t));
            prop_assert_eq!(c.rename_editor().unwrap().entity, EntityId(*t));
            c.rename_editor_mut().unwrap().text = format!("edit{}", n);
        }
        c.finish_rename(&CharMeasurer);
        prop_assert!(c.rename_editor().is_none());

        let last = *targets.last().unwrap();
        for (id, entity) in c.diagram().entities() {
            if id == EntityId(last) {
                prop_assert_eq!(&entity.name, &format!("edit{}", targets.len() - 1));
            } else {
                prop_assert_eq!(&entity.name, "New Entity");
            }
        }
    }
}
