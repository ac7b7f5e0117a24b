//! Architecture verification suite.
//!
//! Ensures the pieces that cross task boundaries stay thread-safe and that
//! the seams remain object-safe trait objects.

#[cfg(test)]
mod architecture_tests {
    use std::sync::Arc;

    use rendezvous::backend::{HttpBackend, ReservationBackend};
    use rendezvous::booking::{OrderManager, Reconciler, ReconcilerHandle, ReservationStore};
    use rendezvous::events::EventBus;
    use rendezvous::identity::IdentityStore;
    use rendezvous::session::{MediaStream, SessionClient, SessionConnector, SessionController};

    fn assert_send_sync<T: Send + Sync>() {}

    // Shared handles must cross task boundaries.
    #[test]
    fn shared_components_are_thread_safe() {
        assert_send_sync::<HttpBackend>();
        assert_send_sync::<ReservationStore>();
        assert_send_sync::<EventBus>();
        assert_send_sync::<Reconciler>();
        assert_send_sync::<ReconcilerHandle>();
        assert_send_sync::<OrderManager>();
        assert_send_sync::<SessionController>();
        assert_send_sync::<IdentityStore>();
    }

    // The seams stay usable as trait objects behind Arc/Box.
    #[test]
    fn seams_are_object_safe() {
        #[allow(dead_code)]
        fn backend_object(backend: Arc<dyn ReservationBackend>) -> Arc<dyn ReservationBackend> {
            backend
        }
        #[allow(dead_code)]
        fn sdk_objects(
            connector: Arc<dyn SessionConnector>,
            client: Box<dyn SessionClient>,
            stream: Arc<dyn MediaStream>,
        ) -> (Arc<dyn SessionConnector>, Box<dyn SessionClient>, Arc<dyn MediaStream>) {
            (connector, client, stream)
        }
    }
}
