//! Pointer events
//!
//! Unified input handling for mouse, touch, and pen. The tracker assigns a
//! pointer id per physical contact so downstream code never has to care
//! which device produced an event.

use serde::{Deserialize, Serialize};

use crate::{Point, TouchInput, TouchPhase};

/// Pointer type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Pointer event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer event
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer_id: u64,
    pub pointer_type: PointerType,
    pub position: Point,
    pub is_primary: bool,
    pub buttons: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Mouse,
    Touch(u64),
}

#[derive(Debug)]
struct ActivePointer {
    id: u64,
    source: Source,
    pointer_type: PointerType,
    is_primary: bool,
    position: Point,
    buttons: u16,
}

impl ActivePointer {
    fn event(&self, kind: PointerEventKind) -> PointerEvent {
        PointerEvent {
            kind,
            pointer_id: self.id,
            pointer_type: self.pointer_type,
            position: self.position,
            is_primary: self.is_primary,
            buttons: self.buttons,
        }
    }
}

/// Folds raw mouse and touch input into pointer events
#[derive(Debug, Default)]
pub struct PointerTracker {
    active: Vec<ActivePointer>,
    next_pointer_id: u64,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            next_pointer_id: 1,
            ..Default::default()
        }
    }

    fn press(
        &mut self,
        source: Source,
        pointer_type: PointerType,
        position: Point,
        buttons: u16,
    ) -> PointerEvent {
        let is_primary = !self
            .active
            .iter()
            .any(|p| p.pointer_type == pointer_type);

        let id = self.next_pointer_id.max(1);
        self.next_pointer_id = id + 1;

        let pointer = ActivePointer {
            id,
            source,
            pointer_type,
            is_primary,
            position,
            buttons,
        };
        let event = pointer.event(PointerEventKind::Down);
        self.active.push(pointer);
        event
    }

    fn moved(&mut self, source: Source, position: Point) -> Option<PointerEvent> {
        let pointer = self.active.iter_mut().find(|p| p.source == source)?;
        pointer.position = position;
        Some(pointer.event(PointerEventKind::Move))
    }

    fn lifted(
        &mut self,
        source: Source,
        position: Point,
        kind: PointerEventKind,
    ) -> Option<PointerEvent> {
        let idx = self.active.iter().position(|p| p.source == source)?;
        let mut pointer = self.active.remove(idx);
        pointer.position = position;
        pointer.buttons = 0;
        Some(pointer.event(kind))
    }

    /// Handle mouse button press. Extra buttons pressed while one is
    /// already held do not start a new pointer.
    pub fn mouse_down(&mut self, position: Point, buttons: u16) -> Option<PointerEvent> {
        if self.active.iter().any(|p| p.source == Source::Mouse) {
            return None;
        }
        Some(self.press(Source::Mouse, PointerType::Mouse, position, buttons))
    }

    /// Handle mouse move. Hover moves with no button held produce nothing.
    pub fn mouse_move(&mut self, position: Point) -> Option<PointerEvent> {
        self.moved(Source::Mouse, position)
    }

    /// Handle mouse button release
    pub fn mouse_up(&mut self, position: Point) -> Option<PointerEvent> {
        self.lifted(Source::Mouse, position, PointerEventKind::Up)
    }

    /// Handle a touch event, one pointer event per changed touch
    pub fn touch(&mut self, input: &TouchInput) -> Vec<PointerEvent> {
        let mut events = Vec::with_capacity(input.changed_touches.len());

        for touch in &input.changed_touches {
            let source = Source::Touch(touch.identifier);
            let event = match input.phase {
                TouchPhase::Start => {
                    if self.active.iter().any(|p| p.source == source) {
                        None
                    } else {
                        Some(self.press(source, PointerType::Touch, touch.position, 1))
                    }
                }
                TouchPhase::Move => self.moved(source, touch.position),
                TouchPhase::End => self.lifted(source, touch.position, PointerEventKind::Up),
                TouchPhase::Cancel => {
                    self.lifted(source, touch.position, PointerEventKind::Cancel)
                }
            };
            events.extend(event);
        }

        events
    }

    /// Cancel every active pointer, e.g. on window blur
    pub fn cancel_all(&mut self) -> Vec<PointerEvent> {
        self.active
            .drain(..)
            .map(|mut p| {
                p.buttons = 0;
                p.event(PointerEventKind::Cancel)
            })
            .collect()
    }

    /// Last known position of an active pointer
    pub fn position(&self, pointer_id: u64) -> Option<Point> {
        self.active
            .iter()
            .find(|p| p.id == pointer_id)
            .map(|p| p.position)
    }

    /// Get active pointer count
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
