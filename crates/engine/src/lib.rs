//! Headless core of the wallets list screen.
//!
//! The engine decides when a wallet needs refreshing, keeps the loading flag
//! honest, tracks the carousel focus and routes the scan button to one input
//! source. Everything it talks to (store, scanner, clipboard, navigation) is
//! a trait in [`collab`], implemented by the front-end.

pub use carousel::{CarouselPositionTracker, CarouselScroll, Transition};
pub use error::EngineError;
pub use refresh::{LoadingState, RefreshCoordinator};
pub use render::{LayoutEnv, ListRenderModel};
pub use sats::{BalanceUnit, Sats};
pub use scan::{Platform, ScanActionDispatcher, ScanGesture, ScanSource};
pub use screen::{Collaborators, WalletsListScreen};
pub use staleness::{FreshnessSnapshot, StalenessPolicy};
pub use wallet::{Transaction, Wallet, WalletKind};

pub mod carousel;
pub mod collab;
mod error;
pub mod refresh;
pub mod render;
mod sats;
pub mod scan;
pub mod screen;
pub mod staleness;
mod wallet;
