pub mod card;
pub mod hints;
pub mod money;
pub mod overlay;
pub mod toast;
