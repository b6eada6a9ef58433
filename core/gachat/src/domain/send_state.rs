//! 送信ガード（同時に 1 リクエストだけ）
//!
//! `Idle → Sending → Idle | Failed`。`Sending` 中の送信は拒否する（キューには積まない）。
//! `Failed` は「直前の試行が失敗したアイドル」で、再送を受け付ける。

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    Idle,
    Sending,
    Failed,
}

/// 送信状態を共有して持つガード
#[derive(Debug, Clone)]
pub struct SendGuard {
    state: Arc<Mutex<SendState>>,
}

fn lock(state: &Mutex<SendState>) -> MutexGuard<'_, SendState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SendGuard {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SendState::Idle)),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SendState {
        *lock(&self.state)
    }

    /// `Idle` / `Failed` なら `Sending` に進めてチケットを返す。`Sending` 中なら None
    pub fn try_begin(&self) -> Option<SendTicket> {
        let mut state = lock(&self.state);
        match *state {
            SendState::Sending => None,
            SendState::Idle | SendState::Failed => {
                *state = SendState::Sending;
                Some(SendTicket {
                    state: Arc::clone(&self.state),
                    finished: false,
                })
            }
        }
    }
}

impl Default for SendGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// 送信中であることを表すチケット
///
/// `finish` せずに drop された場合（ワーカーの panic など）は `Failed` に戻す。
#[derive(Debug)]
pub struct SendTicket {
    state: Arc<Mutex<SendState>>,
    finished: bool,
}

impl SendTicket {
    pub fn finish(mut self, ok: bool) {
        *lock(&self.state) = if ok {
            SendState::Idle
        } else {
            SendState::Failed
        };
        self.finished = true;
    }
}

impl Drop for SendTicket {
    fn drop(&mut self) {
        if !self.finished {
            *lock(&self.state) = SendState::Failed;
        }
    }
}
