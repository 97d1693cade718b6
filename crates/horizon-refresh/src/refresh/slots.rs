//! Header and footer slots on [`ScrollSurface`].
//!
//! A surface owns at most one header and one footer controller. Installing a
//! controller attaches it; replacing or taking one detaches the previous
//! occupant, which restores any inset it had grown.

use std::sync::Arc;

use horizon_refresh_core::logging::targets;
use parking_lot::Mutex;

use super::controller::RefreshController;
use super::error::{RefreshError, RefreshSlot, Result};
use crate::surface::ScrollSurface;

type Slot = Mutex<Option<Arc<RefreshController>>>;

impl ScrollSurface {
    /// Install a header controller, returning the one it replaces.
    ///
    /// Fails with [`RefreshError::SlotMismatch`] for a bottom/right controller.
    pub fn set_header(
        self: &Arc<Self>,
        controller: Arc<RefreshController>,
    ) -> Result<Option<Arc<RefreshController>>> {
        self.install(&self.header, RefreshSlot::Header, controller)
    }

    /// Install a footer controller, returning the one it replaces.
    ///
    /// Fails with [`RefreshError::SlotMismatch`] for a top/left controller.
    pub fn set_footer(
        self: &Arc<Self>,
        controller: Arc<RefreshController>,
    ) -> Result<Option<Arc<RefreshController>>> {
        self.install(&self.footer, RefreshSlot::Footer, controller)
    }

    /// The installed header controller.
    pub fn header(&self) -> Option<Arc<RefreshController>> {
        self.header.lock().clone()
    }

    /// The installed footer controller.
    pub fn footer(&self) -> Option<Arc<RefreshController>> {
        self.footer.lock().clone()
    }

    /// Remove and detach the header controller.
    pub fn take_header(&self) -> Option<Arc<RefreshController>> {
        Self::remove(&self.header)
    }

    /// Remove and detach the footer controller.
    pub fn take_footer(&self) -> Option<Arc<RefreshController>> {
        Self::remove(&self.footer)
    }

    fn install(
        self: &Arc<Self>,
        slot: &Slot,
        kind: RefreshSlot,
        controller: Arc<RefreshController>,
    ) -> Result<Option<Arc<RefreshController>>> {
        let fits = match kind {
            RefreshSlot::Header => !controller.is_footer(),
            RefreshSlot::Footer => controller.is_footer(),
        };
        if !fits {
            return Err(RefreshError::SlotMismatch {
                orientation: controller.orientation(),
                slot: kind,
            });
        }

        let previous = slot.lock().replace(controller.clone());
        if let Some(old) = &previous {
            if !Arc::ptr_eq(old, &controller) {
                old.detach();
            }
        }
        controller.attach(self);

        tracing::debug!(target: targets::SURFACE, slot = %kind, orientation = ?controller.orientation(), "refresh controller installed");
        Ok(previous)
    }

    fn remove(slot: &Slot) -> Option<Arc<RefreshController>> {
        let controller = slot.lock().take()?;
        controller.detach();
        Some(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::refresh::{Orientation, RefreshPresenter, RefreshState};

    struct Quiet;

    impl RefreshPresenter for Quiet {
        fn on_state_changed(&self, _state: RefreshState) {}
        fn on_progress_changed(&self, _progress: f32) {}
    }

    fn controller(orientation: Orientation) -> Arc<RefreshController> {
        RefreshController::builder(orientation, 44.0, || {})
            .presenter(Arc::new(Quiet))
            .build()
            .unwrap()
    }

    fn surface() -> Arc<ScrollSurface> {
        Arc::new(
            ScrollSurface::new(Size::new(320.0, 800.0)).with_content_size(Size::new(320.0, 1000.0)),
        )
    }

    #[test]
    fn test_install_attaches() {
        let s = surface();
        let header = controller(Orientation::Top);
        assert!(s.set_header(header.clone()).unwrap().is_none());
        assert!(header.is_attached());
        assert!(Arc::ptr_eq(&s.header().unwrap(), &header));
        assert!(s.footer().is_none());
    }

    #[test]
    fn test_slot_mismatch() {
        let s = surface();
        let err = s.set_header(controller(Orientation::Bottom)).unwrap_err();
        assert_eq!(
            err,
            RefreshError::SlotMismatch {
                orientation: Orientation::Bottom,
                slot: RefreshSlot::Header,
            }
        );
        assert!(s.set_footer(controller(Orientation::Left)).is_err());
        assert!(s.header().is_none());
        assert!(s.footer().is_none());
    }

    #[test]
    fn test_replace_detaches_previous() {
        let s = surface();
        let first = controller(Orientation::Bottom);
        let second = controller(Orientation::Right);
        s.set_footer(first.clone()).unwrap();

        let previous = s.set_footer(second.clone()).unwrap().unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(!first.is_attached());
        assert!(second.is_attached());
        assert_eq!(s.offset_changed.connection_count(), 1);
    }

    #[test]
    fn test_reinstall_same_controller() {
        let s = surface();
        let header = controller(Orientation::Top);
        s.set_header(header.clone()).unwrap();
        s.set_header(header.clone()).unwrap();
        assert!(header.is_attached());
        assert_eq!(s.offset_changed.connection_count(), 1);
    }

    #[test]
    fn test_take_detaches() {
        let s = surface();
        let header = controller(Orientation::Top);
        s.set_header(header.clone()).unwrap();

        let taken = s.take_header().unwrap();
        assert!(Arc::ptr_eq(&taken, &header));
        assert!(!header.is_attached());
        assert!(s.take_header().is_none());
        assert_eq!(s.offset_changed.connection_count(), 0);
    }
}
