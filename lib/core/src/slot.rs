use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use send_wrapper::SendWrapper;

use infiniscroll_utils::errors::ScrollError;

use crate::observer::{IntersectionBackend, IntersectionCallback, IntersectionObserve, ObserverOptions};

type SharedSlot<B> = SendWrapper<Rc<RefCell<ObserverSlot<B>>>>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotStatus {
    Unattached,
    Watching,
    Released,
}

enum SlotState<B: IntersectionBackend> {
    Unattached,
    Watching {
        observer: B::Observer,
        element: B::Element,
        generation: u64,
    },
    Released,
}

/// Owner of at most one observer instance, watching at most one element.
///
/// Attaching a new element first releases the current observer. Once released, the slot stays released.
pub struct ObserverSlot<B: IntersectionBackend> {
    name: &'static str,
    backend: Rc<B>,
    callback: IntersectionCallback,
    options: ObserverOptions,
    state: SlotState<B>,
    generation: u64,
}

impl<B: IntersectionBackend> ObserverSlot<B> {
    pub fn new(
        name: &'static str,
        backend: Rc<B>,
        callback: IntersectionCallback,
        options: ObserverOptions,
    ) -> Self {
        Self {
            name,
            backend,
            callback,
            options,
            state: SlotState::Unattached,
            generation: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Unattached => SlotStatus::Unattached,
            SlotState::Watching { .. } => SlotStatus::Watching,
            SlotState::Released => SlotStatus::Released,
        }
    }

    pub fn watched_element(&self) -> Option<&B::Element> {
        match &self.state {
            SlotState::Watching { element, .. } => Some(element),
            _ => None,
        }
    }

    /// Starts watching `element` with a new observer and returns the generation of this attachment.
    ///
    /// Attaching the element already watched keeps the current observer.
    pub fn attach(&mut self, element: B::Element) -> Result<u64, ScrollError> {
        match &self.state {
            SlotState::Released => return Err(ScrollError::SlotReleased),
            SlotState::Watching { element: watched_element, generation, .. } if *watched_element == element => {
                return Ok(*generation)
            }
            _ => (),
        }
        self.detach();
        let observer = self.backend.create(self.callback.clone(), &self.options)?;
        observer.observe(&element);
        self.generation += 1;
        log::debug!("Observer slot '{}' watching new element, generation {}.", self.name, self.generation);
        self.state = SlotState::Watching {
            observer,
            element,
            generation: self.generation,
        };
        Ok(self.generation)
    }

    /// Releases the current observer, the slot can be attached again afterwards.
    pub fn detach(&mut self) {
        if !matches!(self.state, SlotState::Watching { .. }) {
            return;
        }
        if let SlotState::Watching { observer, element, .. } = mem::replace(&mut self.state, SlotState::Unattached) {
            log::debug!("Observer slot '{}' releasing its observer.", self.name);
            observer.unobserve(&element);
            observer.disconnect();
        }
    }

    /// Releases the observer of the given attachment if it is still the current one.
    pub fn detach_generation(&mut self, generation: u64) {
        if matches!(self.state, SlotState::Watching { generation: current_generation, .. } if current_generation == generation) {
            self.detach();
        }
    }

    /// Releases the current observer and closes the slot for good.
    pub fn release(&mut self) {
        self.detach();
        self.state = SlotState::Released;
    }
}

impl<B: IntersectionBackend> Drop for ObserverSlot<B> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Releases the observer created by one [`AttachmentHandle::attach`] call
#[must_use = "the slot keeps watching the element until the cleanup is released"]
pub struct AttachmentCleanup<B: IntersectionBackend> {
    slot: SendWrapper<Weak<RefCell<ObserverSlot<B>>>>,
    generation: u64,
}

impl<B: IntersectionBackend> AttachmentCleanup<B> {
    /// Idempotent, does nothing once the slot has moved on to another element or has been dropped.
    pub fn release(&self) {
        if let Some(slot) = self.slot.upgrade() {
            match slot.try_borrow_mut() {
                Ok(mut slot) => slot.detach_generation(self.generation),
                Err(_) => log::warn!("Observer slot busy, cannot release attachment {}.", self.generation),
            }
        }
    }
}

/// Attaches list item elements to an observer slot.
///
/// Handles are cheap to clone and clones share the same slot. A handle created with [`AttachmentHandle::aliased`]
/// redirects to the slot of another handle as long as its collapse signal holds.
pub struct AttachmentHandle<B: IntersectionBackend> {
    slot: SharedSlot<B>,
    alias: Option<(SharedSlot<B>, Signal<bool>)>,
}

impl<B: IntersectionBackend> Clone for AttachmentHandle<B> {
    fn clone(&self) -> Self {
        Self {
            slot: SendWrapper::new(Rc::clone(&self.slot)),
            alias: self.alias.as_ref().map(|(slot, is_collapsed)| (SendWrapper::new(Rc::clone(slot)), *is_collapsed)),
        }
    }
}

impl<B: IntersectionBackend> AttachmentHandle<B> {
    pub fn new(slot: ObserverSlot<B>) -> Self {
        Self {
            slot: SendWrapper::new(Rc::new(RefCell::new(slot))),
            alias: None,
        }
    }

    pub fn aliased(slot: ObserverSlot<B>, target: &AttachmentHandle<B>, is_collapsed: Signal<bool>) -> Self {
        Self {
            slot: SendWrapper::new(Rc::new(RefCell::new(slot))),
            alias: Some((SendWrapper::new(Rc::clone(&target.slot)), is_collapsed)),
        }
    }

    fn is_collapsed(&self) -> bool {
        self.alias.as_ref().is_some_and(|(_, is_collapsed)| is_collapsed.try_get_untracked().unwrap_or(false))
    }

    fn current_slot(&self) -> &Rc<RefCell<ObserverSlot<B>>> {
        match &self.alias {
            Some((target_slot, _)) if self.is_collapsed() => &**target_slot,
            _ => &*self.slot,
        }
    }

    /// Subscribes the running effect to changes of the slot this handle attaches to.
    pub fn track_target(&self) {
        if let Some((_, is_collapsed)) = &self.alias {
            is_collapsed.track();
        }
    }

    /// Watches `element` for intersection changes, `None` is a no-op.
    #[must_use = "the slot keeps watching the element until the cleanup is released"]
    pub fn attach(&self, element: Option<B::Element>) -> Option<AttachmentCleanup<B>> {
        let element = element?;
        if self.is_collapsed() {
            // the own slot is superseded by the aliased one
            if let Ok(mut own_slot) = self.slot.try_borrow_mut() {
                own_slot.detach();
            }
        }
        let slot = self.current_slot();
        let attach_result = match slot.try_borrow_mut() {
            Ok(mut slot) => slot.attach(element),
            Err(_) => {
                log::warn!("Observer slot busy, skipping attachment.");
                return None;
            }
        };
        match attach_result {
            Ok(generation) => Some(AttachmentCleanup {
                slot: SendWrapper::new(Rc::downgrade(slot)),
                generation,
            }),
            Err(ScrollError::SlotReleased) => {
                log::debug!("Ignoring attachment to released observer slot.");
                None
            }
            Err(e) => {
                log::error!("Failed to observe list item: {}", e.error_detail());
                None
            }
        }
    }

    /// Watches `element` until the current reactive owner is cleaned up or re-runs.
    pub fn attach_scoped(&self, element: Option<B::Element>) {
        if let Some(cleanup) = self.attach(element) {
            on_cleanup(move || cleanup.release());
        }
    }

    pub fn status(&self) -> SlotStatus {
        match self.current_slot().try_borrow() {
            Ok(slot) => slot.status(),
            Err(_) => {
                log::debug!("Observer slot busy, reporting it as unattached.");
                SlotStatus::Unattached
            }
        }
    }

    pub fn watched_element(&self) -> Option<B::Element> {
        self.current_slot().try_borrow().ok()?.watched_element().cloned()
    }

    /// Whether both handles currently attach to the same observer slot
    pub fn shares_observer_with(&self, other: &AttachmentHandle<B>) -> bool {
        Rc::ptr_eq(self.current_slot(), other.current_slot())
    }

    /// Closes the handle's own slot, aliased slots are left to their owning handle.
    pub fn release(&self) {
        match self.slot.try_borrow_mut() {
            Ok(mut slot) => slot.release(),
            Err(_) => log::warn!("Observer slot busy, cannot release it."),
        }
    }
}
