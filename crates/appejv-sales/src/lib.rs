//! APPEJV Sales — the order lifecycle and sales-domain mutations.
//!
//! [`lifecycle`] is the pure transition table over order status;
//! [`OrderService`] and [`CustomerService`] are the mutation
//! boundaries that combine capability checks, access guards, atomic
//! status writes, history appends, and audit recording.

pub mod customers;
pub mod lifecycle;
pub mod orders;

pub use customers::CustomerService;
pub use orders::OrderService;
