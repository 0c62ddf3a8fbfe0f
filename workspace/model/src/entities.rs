//! SeaORM entities of the agent portal.
//!
//! Ownership is a strict tree: profile (agent) -> retailer -> terminal -> sale.
//! Statement rows, bank accounts and sessions hang directly off the profile.

pub mod agent_transaction;
pub mod bank_account;
pub mod profile;
pub mod retailer;
pub mod sale;
pub mod session;
pub mod terminal;
pub mod voucher_type;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::agent_transaction::Entity as AgentTransaction;
    pub use super::bank_account::Entity as BankAccount;
    pub use super::profile::Entity as Profile;
    pub use super::retailer::Entity as Retailer;
    pub use super::sale::Entity as Sale;
    pub use super::session::Entity as Session;
    pub use super::terminal::Entity as Terminal;
    pub use super::voucher_type::Entity as VoucherType;
}
