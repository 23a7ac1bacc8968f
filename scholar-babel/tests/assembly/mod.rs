//! Assembly tests
//!
//! Transcript in, report IR out.

mod scenarios;
mod selection;

use scholar_babel::model::{ChatTurn, ResearchMode};

/// A model turn with a fixed id.
pub fn model_turn(id: &str, content: &str, mode: Option<ResearchMode>) -> ChatTurn {
    let mut turn = ChatTurn::model(content, mode, None);
    turn.id = id.to_string();
    turn
}
