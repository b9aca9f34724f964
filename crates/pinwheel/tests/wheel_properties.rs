//! Property tests for the wheel geometry and the selector built on it.

use pinwheel::geometry::{Zone, angle_step, classify_distance, normalize_angle, sector_index};
use pinwheel::{NullSurface, Point, Radii, Selection, SelectorItem, WheelEditor, WheelSelector};
use proptest::prelude::*;
use std::f64::consts::TAU;

fn zone_rank(zone: Zone) -> u8 {
    match zone {
        Zone::Cancel => 0,
        Zone::InRange => 1,
        Zone::OutOfRange => 2,
    }
}

proptest! {
    #[test]
    fn every_angle_maps_to_one_sector(angle in -100.0f64..100.0, count in 1usize..64) {
        let normalized = normalize_angle(angle);
        prop_assert!((0.0..TAU).contains(&normalized));

        let idx = sector_index(normalized, count).unwrap();
        prop_assert!(idx < count);

        // the sector found is the one whose arc contains the angle
        let step = angle_step(count);
        prop_assert!(normalized >= idx as f64 * step);
        if idx + 1 < count {
            prop_assert!(normalized < (idx + 1) as f64 * step);
        }
    }

    #[test]
    fn sectors_are_contiguous(count in 1usize..48, density in 2usize..8) {
        // sampling finer than one sector must visit every sector in order
        let samples = count * density;
        let mut last = 0;
        for i in 0..samples {
            let angle = TAU * i as f64 / samples as f64;
            let idx = sector_index(angle, count).unwrap();
            prop_assert!(idx == last || idx == last + 1);
            last = idx;
        }
        prop_assert_eq!(last, count - 1);
    }

    #[test]
    fn distance_classification_is_monotonic(
        inner in 1.0f64..500.0,
        gap in 0.001f64..500.0,
        a in 0.0f64..2000.0,
        b in 0.0f64..2000.0,
    ) {
        let outer = inner + gap;
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near_zone = classify_distance(near, inner, Some(outer));
        let far_zone = classify_distance(far, inner, Some(outer));
        prop_assert!(zone_rank(near_zone) <= zone_rank(far_zone));
        prop_assert_ne!(classify_distance(far, inner, None), Zone::OutOfRange);
    }

    #[test]
    fn selection_stays_in_range(
        count in 0usize..12,
        moves in prop::collection::vec((-400.0f64..400.0, -400.0f64..400.0), 1..40),
    ) {
        let items = (0..count).map(|i| SelectorItem::new(format!("item {i}"), || {})).collect();
        let mut sel = WheelSelector::new(NullSurface, Radii::new(50.0, 150.0).unwrap())
            .with_items(items);
        sel.activate(Point::default());

        for (x, y) in moves {
            sel.pointer_moved(Point::new(x, y));
            if let Selection::Item(idx) = sel.selection() {
                prop_assert!(idx < count);
            }
        }
        sel.deactivate();
        prop_assert!(!sel.is_active());
        prop_assert_eq!(sel.selection(), Selection::None);
    }

    #[test]
    fn drag_preserves_every_item(
        count in 1usize..10,
        moves in prop::collection::vec((-300.0f64..300.0, -300.0f64..300.0), 1..30),
    ) {
        let items: Vec<_> = (0..count)
            .map(|i| SelectorItem::new(format!("item {i}"), || {}))
            .collect();
        let mut editor = WheelEditor::new(NullSurface, Radii::new(50.0, 150.0).unwrap())
            .with_items(items.clone());
        editor.activate(Point::default());

        editor.pointer_moved(Point::new(100.0, 1.0));
        prop_assert!(editor.pointer_down());
        let dragged = editor.dragging().unwrap().clone();

        for (x, y) in moves {
            editor.pointer_moved(Point::new(x, y));
            let inserted = editor.items().iter().filter(|i| i.same(&dragged)).count();
            match editor.selection() {
                Selection::Item(idx) => {
                    prop_assert_eq!(editor.items().len(), count);
                    prop_assert_eq!(inserted, 1);
                    prop_assert!(editor.items()[idx].same(&dragged));
                }
                _ => {
                    prop_assert_eq!(editor.items().len(), count - 1);
                    prop_assert_eq!(inserted, 0);
                }
            }
            // everything but the dragged item keeps its relative order
            let others: Vec<_> = editor.items().iter().filter(|i| !i.same(&dragged)).collect();
            let expected: Vec<_> = items.iter().filter(|i| !i.same(&dragged)).collect();
            prop_assert_eq!(others.len(), expected.len());
            prop_assert!(others.iter().zip(&expected).all(|(a, b)| a.same(b)));
        }
    }
}
