//! One-shot build worker on a rayon thread pool.

use std::panic::{self, AssertUnwindSafe};

use bevy::log::{debug, warn};
use crossbeam_channel::Sender;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::chunk::{ChunkBuildError, ChunkMeshBuffers};
use crate::request::{BuildReply, ChunkRequest};

/// A reply paired with the tag it was submitted under.
///
/// Callers that no longer want a tile simply ignore replies for its tag.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedReply<T> {
    pub tag: T,
    pub reply: BuildReply,
}

/// Runs chunk builds off the calling thread.
///
/// Every submission produces exactly one [`TaggedReply`] on its sender:
/// the full buffers, or a single message for an error or a panic.
pub struct ChunkBuildWorker {
    pool: ThreadPool,
}

impl ChunkBuildWorker {
    /// Worker with `threads` build threads. `0` lets rayon pick.
    pub fn new(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("chunk-build-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Build `request` on the pool and send the reply to `replies`.
    pub fn submit<T>(&self, tag: T, request: ChunkRequest, replies: Sender<TaggedReply<T>>)
    where
        T: Send + 'static,
    {
        self.submit_with(tag, move || request.build(), replies);
    }

    /// Run an arbitrary build closure on the pool, e.g. one using custom
    /// generators.
    pub fn submit_with<T, F>(&self, tag: T, build: F, replies: Sender<TaggedReply<T>>)
    where
        T: Send + 'static,
        F: FnOnce() -> Result<ChunkMeshBuffers, ChunkBuildError> + Send + 'static,
    {
        self.pool.spawn(move || {
            let reply = run(build);
            if replies.send(TaggedReply { tag, reply }).is_err() {
                debug!("Chunk build finished after its receiver was dropped");
            }
        });
    }
}

/// Run one build, turning errors and panics into a failed reply.
pub fn run<F>(build: F) -> BuildReply
where
    F: FnOnce() -> Result<ChunkMeshBuffers, ChunkBuildError>,
{
    match panic::catch_unwind(AssertUnwindSafe(build)) {
        Ok(Ok(buffers)) => BuildReply::Built(buffers),
        Ok(Err(e)) => {
            warn!("Chunk build failed: {e}");
            BuildReply::Failed(e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!("Chunk build panicked: {message}");
            BuildReply::Failed(message)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "chunk build panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[test]
    fn test_every_submission_gets_one_reply() {
        let worker = ChunkBuildWorker::new(2).unwrap();
        let (tx, rx) = unbounded();

        for i in 0..4u32 {
            let request = ChunkRequest::new([i as f32 * 100.0, 0.0, 0.0], 100.0, 2);
            worker.submit(i, request, tx.clone());
        }
        drop(tx);

        let mut tags: Vec<u32> = rx
            .iter()
            .map(|r| {
                assert!(r.reply.is_built());
                r.tag
            })
            .collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_invalid_request_fails() {
        let worker = ChunkBuildWorker::new(1).unwrap();
        let (tx, rx) = unbounded();

        worker.submit("bad", ChunkRequest::new([0.0; 3], 100.0, 0), tx);

        let reply = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(reply.tag, "bad");
        assert!(reply.reply.error().unwrap().contains("Resolution"));
    }

    #[test]
    fn test_panic_becomes_failed_reply() {
        let worker = ChunkBuildWorker::new(1).unwrap();
        let (tx, rx) = unbounded();

        worker.submit_with(7, || panic!("generator exploded"), tx);

        let reply = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(reply.tag, 7);
        assert_eq!(reply.reply, BuildReply::Failed("generator exploded".into()));
    }

    #[test]
    fn test_dropped_receiver_does_not_stall_pool() {
        let worker = ChunkBuildWorker::new(1).unwrap();
        let (tx, rx) = unbounded();
        drop(rx);
        worker.submit(0, ChunkRequest::new([0.0; 3], 100.0, 1), tx);

        let (tx, rx) = unbounded();
        worker.submit(1, ChunkRequest::new([0.0; 3], 100.0, 1), tx);
        let reply = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(reply.tag, 1);
        assert!(reply.reply.is_built());
    }

    #[test]
    fn test_run_passes_buffers_through() {
        let reply = run(|| Ok(ChunkMeshBuffers::default()));
        assert_eq!(reply, BuildReply::Built(ChunkMeshBuffers::default()));
    }
}
