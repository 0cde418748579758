//! Swipe recognition for page navigation.
//!
//! A gesture is tracked between a touch start and the matching touch end.
//! Outside of that window the tracker holds no coordinates at all, so a tap
//! can never be mistaken for a swipe left over from an earlier touch.

use serde::{Deserialize, Serialize};

/// A position in viewport coordinates.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Where a touch began.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum TouchOrigin {
    /// Anywhere on the board background
    Board,
    /// A sound button or a navigation control, which handle the touch themselves
    Control,
}

/// Direction of a recognized swipe.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Swipe {
    /// The finger moved leftward: show the following page
    Next,
    /// The finger moved rightward: show the preceding page
    Previous,
}

#[derive(Clone, Copy, Debug)]
struct Track {
    start: Point,
    end: Option<Point>,
}

#[derive(Clone, Debug)]
pub struct GestureTracker {
    threshold: f64,
    track: Option<Track>,
}

impl GestureTracker {
    /// `threshold` is the minimum horizontal displacement of a swipe.
    pub fn new(threshold: f64) -> Self {
        GestureTracker {
            threshold,
            track: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.track.is_some()
    }

    /// Begins a gesture. Touches on controls are left to the controls.
    pub fn begin(&mut self, point: Point, origin: TouchOrigin) {
        self.track = match origin {
            TouchOrigin::Board => Some(Track {
                start: point,
                end: None,
            }),
            TouchOrigin::Control => None,
        };
    }

    pub fn track(&mut self, point: Point) {
        if let Some(track) = self.track.as_mut() {
            track.end = Some(point);
        }
    }

    /// Ends the gesture, returning the swipe it amounts to.
    ///
    /// The tracker is reset whatever the outcome.
    pub fn finish(&mut self, last: Option<Point>) -> Option<Swipe> {
        let track = self.track.take()?;
        let end = last.or(track.end)?;
        self.classify(track.start, end)
    }

    /// Drops the gesture in progress.
    pub fn cancel(&mut self) {
        self.track = None;
    }

    fn classify(&self, start: Point, end: Point) -> Option<Swipe> {
        let dx = start.x - end.x;
        let dy = start.y - end.y;
        if dx.abs() > dy.abs() && dx.abs() > self.threshold {
            if dx > 0.0 {
                Some(Swipe::Next)
            } else {
                Some(Swipe::Previous)
            }
        } else {
            None
        }
    }
}
