pub mod detail;
pub mod transactions;
pub mod wallets;
