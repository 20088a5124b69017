pub mod apply_entry;
pub mod create_wallet;
pub mod get_balance;
pub mod hold_capture;
pub mod hold_create;
pub mod hold_release;
pub mod list_statement;
pub mod reconcile;
pub mod transfer;
