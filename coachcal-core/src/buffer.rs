//! Presentation buffer between translated events and the calendar surface.
//!
//! The surface may need time to initialize before it can show anything.
//! Until [`PresentationBuffer::become_ready`] fires, every write lands in a
//! pending queue; afterwards writes pass straight through.

use tracing::debug;

use crate::event::CalendarEvent;

/// Something that displays calendar events.
pub trait CalendarSurface {
    fn clear_all(&mut self);
    fn add(&mut self, event: &CalendarEvent);
    fn remove(&mut self, event_id: &str);
    fn force_redraw(&mut self);
}

/// Readiness latch. `NotReady -> Ready` happens once; `Detached` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    NotReady,
    Ready,
    Detached,
}

pub struct PresentationBuffer<S: CalendarSurface> {
    surface: S,
    readiness: Readiness,
    pending: Vec<CalendarEvent>,
    /// Mirror of what the surface currently shows.
    delivered: Vec<CalendarEvent>,
}

impl<S: CalendarSurface> PresentationBuffer<S> {
    pub fn new(surface: S) -> Self {
        PresentationBuffer {
            surface,
            readiness: Readiness::NotReady,
            pending: Vec::new(),
            delivered: Vec::new(),
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Events waiting for the surface to become ready.
    pub fn pending(&self) -> &[CalendarEvent] {
        &self.pending
    }

    /// Events delivered to the surface, in delivery order.
    pub fn delivered(&self) -> &[CalendarEvent] {
        &self.delivered
    }

    /// Replace everything shown with `events`.
    pub fn replace_all(&mut self, events: Vec<CalendarEvent>) {
        match self.readiness {
            Readiness::Ready => {
                self.surface.clear_all();
                self.delivered.clear();
                for event in events {
                    self.deliver(event);
                }
            }
            Readiness::NotReady => {
                debug!(count = events.len(), "Surface not ready, holding events");
                self.pending = events;
            }
            Readiness::Detached => {
                debug!(count = events.len(), "Buffer detached, discarding events");
            }
        }
    }

    /// Add a single event without reloading the rest.
    ///
    /// An event with the same id as one already shown (or pending) replaces it.
    pub fn append_one(&mut self, event: CalendarEvent) {
        match self.readiness {
            Readiness::Ready => {
                if self.delivered.iter().any(|e| e.id == event.id) {
                    self.surface.remove(&event.id);
                    self.delivered.retain(|e| e.id != event.id);
                }
                self.deliver(event);
                self.surface.force_redraw();
            }
            Readiness::NotReady => {
                match self.pending.iter_mut().find(|e| e.id == event.id) {
                    Some(existing) => *existing = event,
                    None => self.pending.push(event),
                }
                debug!(pending = self.pending.len(), "Surface not ready, queued event");
            }
            Readiness::Detached => {
                debug!(event_id = %event.id, "Buffer detached, discarding event");
            }
        }
    }

    /// Remove an event by id. Returns whether anything was removed.
    pub fn remove(&mut self, event_id: &str) -> bool {
        match self.readiness {
            Readiness::Ready => {
                let before = self.delivered.len();
                self.delivered.retain(|e| e.id != event_id);
                if self.delivered.len() == before {
                    return false;
                }
                self.surface.remove(event_id);
                self.surface.force_redraw();
                true
            }
            Readiness::NotReady => {
                let before = self.pending.len();
                self.pending.retain(|e| e.id != event_id);
                self.pending.len() != before
            }
            Readiness::Detached => false,
        }
    }

    /// Signal that the surface finished its first render.
    ///
    /// Flushes pending events in order. Later calls do nothing.
    pub fn become_ready(&mut self) {
        if self.readiness != Readiness::NotReady {
            return;
        }

        self.readiness = Readiness::Ready;
        let pending = std::mem::take(&mut self.pending);
        debug!(count = pending.len(), "Surface ready, flushing pending events");
        for event in pending {
            self.deliver(event);
        }
    }

    /// Stop delivering to the surface. All later writes are ignored.
    pub fn detach(&mut self) {
        self.readiness = Readiness::Detached;
        self.pending.clear();
    }

    fn deliver(&mut self, event: CalendarEvent) {
        self.surface.add(&event);
        self.delivered.push(event);
    }
}
