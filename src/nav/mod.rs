//! Floating navigation bar that hides while scrolling down.

use crate::events::{EventSource, Subscription};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Progress below which the bar is always shown.
pub const TOP_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// Vertical scroll progress in [0, 1] and the value before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollProgress {
    pub current: f64,
    pub previous: f64,
}

impl ScrollProgress {
    pub fn visibility(&self) -> Visibility {
        if self.current < TOP_THRESHOLD || self.current < self.previous {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }
}

/// Tracks bar visibility across scroll changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityController {
    visibility: Visibility,
}

impl VisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_scroll(&mut self, progress: ScrollProgress) -> Visibility {
        self.visibility = progress.visibility();
        self.visibility
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// Source of scroll progress changes.
///
/// Remembers the last value so each event carries its predecessor.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    progress: f64,
    events: EventSource<ScrollProgress>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&ScrollProgress) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    /// Record a new progress value. Unchanged values emit nothing.
    pub fn set_progress(&mut self, current: f64) {
        if current == self.progress {
            return;
        }
        let change = ScrollProgress {
            current,
            previous: self.progress,
        };
        self.progress = current;
        self.events.emit(&change);
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

/// Animation target for the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTransition {
    /// Vertical offset in pixels.
    pub offset_y: f32,
    pub opacity: f32,
    /// Seconds.
    pub duration: f32,
}

impl NavTransition {
    pub const DURATION: f32 = 0.2;
    pub const HIDDEN_OFFSET: f32 = -100.0;

    /// State the bar enters from before its first animation.
    pub fn initial() -> Self {
        Self {
            offset_y: Self::HIDDEN_OFFSET,
            opacity: 1.0,
            duration: Self::DURATION,
        }
    }

    pub fn for_visibility(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Visible => Self {
                offset_y: 0.0,
                opacity: 1.0,
                duration: Self::DURATION,
            },
            Visibility::Hidden => Self {
                offset_y: Self::HIDDEN_OFFSET,
                opacity: 0.0,
                duration: Self::DURATION,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub name: String,
    pub link: String,
}

/// Navigation items plus the controller deciding whether they are shown.
#[derive(Debug, Default)]
pub struct FloatingNav {
    items: Vec<NavItem>,
    controller: VisibilityController,
    subscription: Option<Subscription>,
}

impl FloatingNav {
    /// Items are keyed by link; later duplicates are dropped.
    pub fn new(items: Vec<NavItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let unique = seen.insert(item.link.clone());
                if !unique {
                    log::warn!("Dropping nav item {:?} with duplicate link {}", item.name, item.link);
                }
                unique
            })
            .collect();

        Self {
            items,
            controller: VisibilityController::new(),
            subscription: None,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn visibility(&self) -> Visibility {
        self.controller.visibility()
    }

    pub fn on_scroll(&mut self, progress: ScrollProgress) -> Visibility {
        self.controller.on_scroll(progress)
    }

    /// Current animation target.
    pub fn transition(&self) -> NavTransition {
        NavTransition::for_visibility(self.visibility())
    }

    /// Subscribe `nav` to scroll changes from `tracker`.
    pub fn attach(nav: &Rc<RefCell<Self>>, tracker: &mut ScrollTracker) -> Subscription {
        Self::detach(nav, tracker);
        let weak = Rc::downgrade(nav);
        let subscription = tracker.subscribe(move |progress| {
            if let Some(nav) = weak.upgrade() {
                if let Ok(mut nav) = nav.try_borrow_mut() {
                    nav.on_scroll(*progress);
                }
            }
        });
        nav.borrow_mut().subscription = Some(subscription);
        subscription
    }

    pub fn detach(nav: &Rc<RefCell<Self>>, tracker: &mut ScrollTracker) -> bool {
        let subscription = nav.borrow_mut().subscription.take();
        match subscription {
            Some(subscription) => tracker.unsubscribe(subscription),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(current: f64, previous: f64) -> ScrollProgress {
        ScrollProgress { current, previous }
    }

    #[test]
    fn test_near_top_is_always_visible() {
        assert_eq!(progress(0.04, 0.0).visibility(), Visibility::Visible);
        assert_eq!(progress(0.05, 0.0).visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_direction_decides_below_threshold() {
        assert_eq!(progress(0.5, 0.6).visibility(), Visibility::Visible);
        assert_eq!(progress(0.6, 0.5).visibility(), Visibility::Hidden);
        assert_eq!(progress(0.5, 0.5).visibility(), Visibility::Hidden);
    }

    #[test]
    fn test_transition_targets() {
        let initial = NavTransition::initial();
        assert_eq!((initial.opacity, initial.offset_y), (1.0, -100.0));

        let hidden = NavTransition::for_visibility(Visibility::Hidden);
        assert_eq!((hidden.opacity, hidden.offset_y), (0.0, -100.0));
        assert_eq!(hidden.duration, 0.2);
    }

    #[test]
    fn test_duplicate_links_dropped() {
        let item = |name: &str, link: &str| NavItem {
            name: name.to_string(),
            link: link.to_string(),
        };
        let nav = FloatingNav::new(vec![item("Home", "/"), item("About", "/about"), item("Again", "/")]);
        let names: Vec<_> = nav.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Home", "About"]);
    }
}
