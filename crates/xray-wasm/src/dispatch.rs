//! Outcome delivery between a shared recognizer and its host.
//!
//! Recognizer callbacks only enqueue. The queue is drained once the
//! recognizer borrow is released, one notice at a time, so a host callback
//! may feed more input or dispose the recognizer from inside a delivery.
//! Nothing is delivered once the outbox is closed.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use xray_core::Point;
use xray_gesture::{Haptics, LongPress, PressCallbacks, PressInput, RawPointerEvent, TimerDriver, TimerToken};

/// An outcome waiting to be handed to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    LongPressStart(Point),
    LongPressEnd(Point),
    Press(Point),
    /// `pressed` flipped to the carried value.
    Changed(bool),
}

/// Host side of the outbox.
pub trait NoticeSink {
    fn deliver(&self, notice: Notice);
}

pub struct Outbox<S> {
    queue: RefCell<VecDeque<Notice>>,
    closed: Cell<bool>,
    sink: S,
}

impl<S: NoticeSink> Outbox<S> {
    pub fn new(sink: S) -> Self {
        Self {
            queue: RefCell::new(VecDeque::new()),
            closed: Cell::new(false),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn push(&self, notice: Notice) {
        if !self.closed.get() {
            self.queue.borrow_mut().push_back(notice);
        }
    }

    /// Recognizer callbacks that only enqueue.
    pub fn press_callbacks(self: &Rc<Self>) -> PressCallbacks
    where
        S: 'static,
    {
        let (start, end, press) = (Rc::clone(self), Rc::clone(self), Rc::clone(self));
        PressCallbacks::new()
            .on_long_press_start(move |at| start.push(Notice::LongPressStart(at)))
            .on_long_press_end(move |at| end.push(Notice::LongPressEnd(at)))
            .on_press(move |at| press.push(Notice::Press(at)))
    }

    /// Feed one native event. Returns true if `pressed` changed.
    pub fn input<T: TimerDriver, H: Haptics>(
        &self,
        recognizer: &RefCell<LongPress<T, H>>,
        input: PressInput,
        event: &RawPointerEvent,
    ) -> bool {
        if self.closed.get() {
            return false;
        }
        let change = {
            let Ok(mut recognizer) = recognizer.try_borrow_mut() else {
                log::warn!("recognizer busy; dropping {}", input.dom_name());
                return false;
            };
            recognizer
                .handle(input, event)
                .then(|| recognizer.pressed())
        };
        self.settle(change)
    }

    /// Deliver a timer that came due. Returns true if `pressed` changed.
    pub fn timer<T: TimerDriver, H: Haptics>(
        &self,
        recognizer: &RefCell<LongPress<T, H>>,
        token: TimerToken,
    ) -> bool {
        if self.closed.get() {
            return false;
        }
        let change = {
            let Ok(mut recognizer) = recognizer.try_borrow_mut() else {
                log::warn!("recognizer busy; dropping {token}");
                return false;
            };
            recognizer
                .on_timer(token)
                .then(|| recognizer.pressed())
        };
        self.settle(change)
    }

    /// Close the outbox, drop anything undelivered and dispose the recognizer.
    pub fn dispose<T: TimerDriver, H: Haptics>(&self, recognizer: &RefCell<LongPress<T, H>>) {
        self.closed.set(true);
        self.queue.borrow_mut().clear();
        match recognizer.try_borrow_mut() {
            Ok(mut recognizer) => recognizer.dispose(),
            Err(_) => log::warn!("recognizer busy; dispose skipped"),
        }
    }

    fn settle(&self, change: Option<bool>) -> bool {
        if let Some(pressed) = change {
            self.push(Notice::Changed(pressed));
        }
        self.flush();
        change.is_some()
    }

    /// Deliver queued notices in order until the queue is empty or closed.
    fn flush(&self) {
        while !self.closed.get() {
            let Some(notice) = self.queue.borrow_mut().pop_front() else {
                return;
            };
            self.sink.deliver(notice);
        }
    }
}
