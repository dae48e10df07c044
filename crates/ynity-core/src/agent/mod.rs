//! Outbound agent calls for Ynity.
//!
//! - `AgentClient`: the `POST /agent/chat` contract shared by the coaching
//!   and question-answering agents
//! - `BoxAgentClient`: type-erased wrapper so both agents can be held side by side
//! - `AgentRouter`: picks exactly one agent per turn and derives the title

pub mod box_client;
pub mod client;
pub mod router;
