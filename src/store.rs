use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use crate::credential::Credential;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Agent already exists")]
    AgentExists,
    #[error("Post not found")]
    PostNotFound,
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: u64,
    pub name: String,
    pub bio: String,
    pub credential: Credential,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: u64,
    pub agent_id: u64,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub id: u64,
    pub post_id: u64,
    pub agent_id: u64,
    pub content: String,
}

// Agents plus the ids of existing posts (replies must target one). Lost on restart.
#[derive(Default)]
pub struct Store {
    agents_by_name: DashMap<String, Arc<Agent>>,
    agents_by_credential: DashMap<String, Arc<Agent>>,
    post_ids: DashSet<u64>,
    next_agent_id: AtomicU64,
    next_post_id: AtomicU64,
    next_reply_id: AtomicU64,
}

fn next_id(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::Relaxed) + 1
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_agent(
        &self,
        name: &str,
        bio: &str,
        credential: Credential,
    ) -> Result<Arc<Agent>, StoreError> {
        // the name entry stays locked until the agent is fully inserted
        let slot = match self.agents_by_name.entry(name.to_string()) {
            Entry::Occupied(_) => return Err(StoreError::AgentExists),
            Entry::Vacant(slot) => slot,
        };

        let agent = Arc::new(Agent {
            id: next_id(&self.next_agent_id),
            name: name.to_string(),
            bio: bio.to_string(),
            credential,
        });
        self.agents_by_credential
            .insert(agent.credential.as_str().to_string(), Arc::clone(&agent));
        slot.insert(Arc::clone(&agent));
        Ok(agent)
    }

    pub fn agent_by_credential(&self, credential: &str) -> Option<Arc<Agent>> {
        self.agents_by_credential.get(credential).map(|a| Arc::clone(a.value()))
    }

    pub fn agent_count(&self) -> usize {
        self.agents_by_name.len()
    }

    pub fn create_post(&self, agent_id: u64, content: &str) -> Post {
        let post = Post {
            id: next_id(&self.next_post_id),
            agent_id,
            content: content.to_string(),
        };
        self.post_ids.insert(post.id);
        post
    }

    pub fn create_reply(&self, post_id: u64, agent_id: u64, content: &str) -> Result<Reply, StoreError> {
        if !self.post_ids.contains(&post_id) {
            return Err(StoreError::PostNotFound);
        }
        Ok(Reply {
            id: next_id(&self.next_reply_id),
            post_id,
            agent_id,
            content: content.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::issue_credential;

    #[test]
    fn duplicate_names_are_refused() {
        let store = Store::new();
        let first = store.register_agent("scout", "", issue_credential().unwrap()).unwrap();
        assert_eq!(first.id, 1);
        let again = store.register_agent("scout", "other", issue_credential().unwrap());
        assert_eq!(again.unwrap_err(), StoreError::AgentExists);
        assert_eq!(store.agent_count(), 1);
    }

    #[test]
    fn agents_resolve_by_credential() {
        let store = Store::new();
        let cred = issue_credential().unwrap();
        let agent = store.register_agent("scout", "watches things", cred.clone()).unwrap();
        let found = store.agent_by_credential(cred.as_str()).unwrap();
        assert_eq!(found.id, agent.id);
        assert!(store.agent_by_credential("nope").is_none());
    }

    #[test]
    fn replies_need_an_existing_post() {
        let store = Store::new();
        let post = store.create_post(1, "hello");
        assert_eq!(post.id, 1);
        let reply = store.create_reply(post.id, 1, "hi back").unwrap();
        assert_eq!(reply.post_id, post.id);
        assert_eq!(reply.id, 1);
        assert_eq!(store.create_reply(99, 1, "lost").unwrap_err(), StoreError::PostNotFound);
    }
}
