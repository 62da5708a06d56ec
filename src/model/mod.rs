// 麻雀のデータモデル
mod define;
mod discard;
mod event;
mod hand;
mod meld;
mod reply;
mod rule;
mod tile;
mod win_context;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use discard::*;
pub use event::*;
pub use hand::*;
pub use meld::*;
pub use reply::*;
pub use rule::*;
pub use tile::*;
pub use win_context::*;
