//! Integration tests for the floating nav visibility controller.

use lumen_fx::nav::{
    FloatingNav, NavItem, NavTransition, ScrollProgress, ScrollTracker, Visibility,
    VisibilityController,
};
use std::cell::RefCell;
use std::rc::Rc;

use Visibility::{Hidden, Visible};

#[test]
fn test_controller_starts_visible() {
    assert_eq!(VisibilityController::new().visibility(), Visible);
}

#[test]
fn test_scroll_sequence() {
    let sequence = [0.0, 0.02, 0.10, 0.15, 0.08];
    let expected = [Visible, Visible, Hidden, Hidden, Visible];

    let mut controller = VisibilityController::new();
    let mut previous = 0.0;
    for (current, want) in sequence.into_iter().zip(expected) {
        let got = controller.on_scroll(ScrollProgress { current, previous });
        assert_eq!(got, want, "at progress {current}");
        previous = current;
    }
}

#[test]
fn test_tracker_drives_attached_nav() {
    let mut tracker = ScrollTracker::new();
    let nav = Rc::new(RefCell::new(FloatingNav::new(vec![NavItem {
        name: "Home".to_string(),
        link: "/".to_string(),
    }])));
    FloatingNav::attach(&nav, &mut tracker);

    let mut seen = Vec::new();
    for progress in [0.02, 0.10, 0.15, 0.08] {
        tracker.set_progress(progress);
        seen.push(nav.borrow().visibility());
    }
    assert_eq!(seen, [Visible, Hidden, Hidden, Visible]);
    assert_eq!(nav.borrow().transition(), NavTransition::for_visibility(Visible));
}

#[test]
fn test_tracker_reports_previous_value() {
    let mut tracker = ScrollTracker::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let e = events.clone();
    tracker.subscribe(move |p| e.borrow_mut().push(*p));

    tracker.set_progress(0.3);
    tracker.set_progress(0.3);
    tracker.set_progress(0.2);

    assert_eq!(
        *events.borrow(),
        vec![
            ScrollProgress {
                current: 0.3,
                previous: 0.0
            },
            ScrollProgress {
                current: 0.2,
                previous: 0.3
            },
        ]
    );
}

#[test]
fn test_detached_nav_keeps_last_visibility() {
    let mut tracker = ScrollTracker::new();
    let nav = Rc::new(RefCell::new(FloatingNav::default()));
    FloatingNav::attach(&nav, &mut tracker);

    tracker.set_progress(0.5);
    assert_eq!(nav.borrow().visibility(), Hidden);

    assert!(FloatingNav::detach(&nav, &mut tracker));
    tracker.set_progress(0.1);
    assert_eq!(nav.borrow().visibility(), Hidden);
}
