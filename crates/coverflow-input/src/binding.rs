use crate::surface::{InputSurface, ListenerKind, Subscription};
use crate::InputEvent;
use coverflow_engine::Coverflow;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// The three listeners wiring a surface to an engine.
///
/// Dropping the attachment releases all of them, however teardown happens.
#[derive(Debug)]
pub struct Attachment {
    _wheel: Subscription,
    _touch_begin: Subscription,
    _touch_end: Subscription,
}

impl Drop for Attachment {
    fn drop(&mut self) {
        debug!("Detaching gallery input listeners");
    }
}

/// Register one wheel listener and two touch listeners that feed `engine`.
pub fn attach<H: 'static>(surface: &InputSurface, engine: Rc<RefCell<Coverflow<H>>>) -> Attachment {
    let wheel_engine = engine.clone();
    let wheel = surface.subscribe(ListenerKind::Wheel, move |event| {
        if let InputEvent::Wheel { delta_y } = *event {
            wheel_engine.borrow_mut().wheel(delta_y);
        }
    });

    let begin_engine = engine.clone();
    let touch_begin = surface.subscribe(ListenerKind::TouchBegin, move |event| {
        if let InputEvent::TouchBegin { x, at } = *event {
            begin_engine.borrow_mut().touch_begin(x, at);
        }
    });

    let touch_end = surface.subscribe(ListenerKind::TouchEnd, move |event| {
        if let InputEvent::TouchEnd { x, at } = *event {
            engine.borrow_mut().touch_end(x, at);
        }
    });

    debug!(listeners = surface.listener_count(), "Gallery input attached");

    Attachment {
        _wheel: wheel,
        _touch_begin: touch_begin,
        _touch_end: touch_end,
    }
}
