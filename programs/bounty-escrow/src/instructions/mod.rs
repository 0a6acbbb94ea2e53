#![allow(ambiguous_glob_reexports)]

pub mod accept_authority;
pub mod emergency_recovery;
pub mod execute_time_escape_plan;
pub mod initialize_lottery;
pub mod process_ai_decision;
pub mod process_entry_payment;
pub mod set_backend_authority;
pub mod set_lottery_active;
pub mod transfer_authority;

pub use accept_authority::*;
pub use emergency_recovery::*;
pub use execute_time_escape_plan::*;
pub use initialize_lottery::*;
pub use process_ai_decision::*;
pub use process_entry_payment::*;
pub use set_backend_authority::*;
pub use set_lottery_active::*;
pub use transfer_authority::*;
