// src/client/feed.rs - newest-first view of the remote posts collection
//
// Local state only changes after the backend has answered; there are no
// optimistic inserts or removals.

use std::sync::Arc;

use log::{error, info, warn};
use tokio::sync::watch;
use uuid::Uuid;

use super::api::{ApiError, PostsApi};
use super::prompt::Prompter;
use crate::dtos::post_dtos::CreatePostDTO;
use crate::models::Post;

/// Immutable view of the feed, newest post first.
pub type FeedSnapshot = Arc<[Post]>;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this post?";
pub const CREATE_FAILED_ALERT: &str = "Failed to create post";
pub const DELETE_FAILED_ALERT: &str = "Failed to delete post";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was sent.
    Declined,
}

pub struct FeedStore<A, P> {
    api: A,
    prompter: P,
    feed: watch::Sender<FeedSnapshot>,
}

impl<A: PostsApi, P: Prompter> FeedStore<A, P> {
    pub fn new(api: A, prompter: P) -> Self {
        let (feed, _) = watch::channel(FeedSnapshot::from(Vec::new()));
        Self {
            api,
            prompter,
            feed,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.feed.borrow().clone()
    }

    /// Change events: the receiver is notified with every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.feed.subscribe()
    }

    /// Replace the feed with the backend collection, reversed so the newest
    /// post comes first. Failures are logged only and keep the prior feed.
    pub async fn load(&self) -> Result<usize, ApiError> {
        match self.api.list_posts().await {
            Ok(mut posts) => {
                posts.reverse();
                let count = posts.len();
                self.feed.send_replace(posts.into());
                info!("feed loaded with {} posts", count);
                Ok(count)
            }
            Err(e) => {
                error!("Error fetching posts: {}", e);
                Err(e)
            }
        }
    }

    /// Create a post and prepend the backend's record on success.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        image_url: Option<String>,
    ) -> Result<Post, ApiError> {
        let dto = CreatePostDTO::new(title, content, image_url);
        match self.api.create_post(&dto).await {
            Ok(post) => {
                self.feed.send_modify(|feed| {
                    *feed = std::iter::once(post.clone())
                        .chain(feed.iter().cloned())
                        .collect();
                });
                info!("post {} added to feed", post.id);
                Ok(post)
            }
            Err(e) => {
                error!("Error creating post: {}", e);
                self.prompter.alert(CREATE_FAILED_ALERT);
                Err(e)
            }
        }
    }

    /// Ask for confirmation, then delete remotely and drop the local entry.
    pub async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, ApiError> {
        if !self.prompter.confirm(DELETE_CONFIRMATION) {
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(e) = self.api.delete_post(id).await {
            error!("Error deleting post {}: {}", id, e);
            self.prompter.alert(DELETE_FAILED_ALERT);
            return Err(e);
        }

        let removed = self.feed.send_if_modified(|feed| {
            if !feed.iter().any(|p| p.id == id) {
                return false;
            }
            *feed = feed.iter().filter(|p| p.id != id).cloned().collect();
            true
        });
        if !removed {
            warn!("deleted post {} was not in the local feed", id);
        }
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::client::testing::{post, FakeApi, ScriptedPrompter};

    fn titles(snapshot: &FeedSnapshot) -> Vec<&str> {
        snapshot.iter().map(|p| p.title.as_str()).collect()
    }

    fn seeded(answer: bool) -> (FeedStore<FakeApi, ScriptedPrompter>, Post, Post) {
        let a = post("a");
        let b = post("b");
        let store = FeedStore::new(
            FakeApi::with_posts(vec![a.clone(), b.clone()]),
            ScriptedPrompter::new(answer),
        );
        (store, a, b)
    }

    #[tokio::test]
    async fn load_reverses_backend_order() {
        let (store, _, _) = seeded(true);
        assert_eq!(store.load().await.unwrap(), 2);
        assert_eq!(titles(&store.snapshot()), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_feed_silently() {
        let (store, _, _) = seeded(true);
        store.load().await.unwrap();

        store.api().fail_list.store(true, Ordering::SeqCst);
        assert!(store.load().await.is_err());
        assert_eq!(titles(&store.snapshot()), vec!["b", "a"]);
        assert!(store.prompter().alerts().is_empty());
    }

    #[tokio::test]
    async fn creates_appear_in_reverse_call_order_before_loaded_posts() {
        let (store, _, _) = seeded(true);
        store.load().await.unwrap();

        for title in ["c", "d", "e"] {
            store.create(title, "body", None).await.unwrap();
        }
        assert_eq!(titles(&store.snapshot()), vec!["e", "d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn create_without_image_sends_none() {
        let (store, _, _) = seeded(true);
        let created = store.create("c", "body", Some(String::new())).await.unwrap();

        assert_eq!(created.image_url, None);
        assert_eq!(store.api().created.lock().unwrap()[0].image_url, None);
    }

    #[tokio::test]
    async fn rejected_create_alerts_and_leaves_feed() {
        let (store, _, _) = seeded(true);
        store.load().await.unwrap();
        store.api().fail_create.store(true, Ordering::SeqCst);

        assert!(store.create("c", "body", None).await.is_err());
        assert_eq!(titles(&store.snapshot()), vec!["b", "a"]);
        assert_eq!(store.prompter().alerts(), vec![CREATE_FAILED_ALERT.to_string()]);
    }

    #[tokio::test]
    async fn full_scenario_load_create_delete() {
        let (store, a, b) = seeded(true);
        store.load().await.unwrap();
        let c = store.create("c", "body", None).await.unwrap();
        assert_eq!(titles(&store.snapshot()), vec!["c", "b", "a"]);

        let outcome = store.delete(b.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        let ids: Vec<Uuid> = store.snapshot().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, a.id]);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let (store, a, _) = seeded(false);
        store.load().await.unwrap();

        let outcome = store.delete(a.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(store.api().delete_calls.load(Ordering::SeqCst), 0);
        assert_eq!(titles(&store.snapshot()), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn deleting_unknown_id_reports_failure() {
        let (store, _, _) = seeded(true);
        store.load().await.unwrap();

        assert!(store.delete(Uuid::new_v4()).await.is_err());
        assert_eq!(titles(&store.snapshot()), vec!["b", "a"]);
        assert_eq!(store.prompter().alerts(), vec![DELETE_FAILED_ALERT.to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_operations_do_not_lose_updates() {
        let seed: Vec<Post> = (0..16).map(|i| post(&format!("seed{i}"))).collect();
        let store = Arc::new(FeedStore::new(
            FakeApi::with_posts(seed.clone()),
            ScriptedPrompter::new(true),
        ));
        store.load().await.unwrap();

        let mut tasks = Vec::new();
        for i in 0..16 {
            let creator = store.clone();
            tasks.push(tokio::spawn(async move {
                creator.create(&format!("new{i}"), "body", None).await.unwrap();
            }));
            let deleter = store.clone();
            let id = seed[i].id;
            tasks.push(tokio::spawn(async move {
                deleter.delete(id).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let feed = store.snapshot();
        assert_eq!(feed.len(), 16);
        assert!(feed.iter().all(|p| p.title.starts_with("new")));
    }

    #[tokio::test]
    async fn deleting_post_missing_locally_leaves_feed_unnotified() {
        let (store, _, _) = seeded(true);
        store.load().await.unwrap();
        let extra = store.api().create_post(&CreatePostDTO::new("x", "body", None)).await.unwrap();
        let mut rx = store.subscribe();

        assert_eq!(store.delete(extra.id).await.unwrap(), DeleteOutcome::Deleted);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(titles(&store.snapshot()), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn subscribers_see_each_change() {
        let (store, _, _) = seeded(true);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.load().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(titles(&rx.borrow_and_update()), vec!["b", "a"]);

        store.create("c", "body", None).await.unwrap();
        assert_eq!(titles(&rx.borrow_and_update()), vec!["c", "b", "a"]);
    }
}
