//! HTTP gateways in front of managed AI services: Azure AI Search, Document
//! Intelligence and Speech for the EduVoice page, and a hosted Foundry agent
//! for the chat page.

pub mod api;
pub mod domain;
pub mod infrastructure;
