//! Ports & Adapters のポート定義
//!
//! - inbound: CLI がアプリを呼び出すための trait
//! - outbound: アプリが外界（HTTP・永続化・描画・表示）に依頼するための trait

pub mod inbound;
pub mod outbound;
