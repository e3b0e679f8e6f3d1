// src/db/notification_repo.rs

use std::collections::VecDeque;

use tokio::sync::Mutex;

use crate::models::notifications::Notice;

/// Fila limitada de avisos de uma sessão. Quando cheia, o mais antigo sai.
pub struct NotificationFeed {
    capacity: usize,
    notices: Mutex<VecDeque<Notice>>,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            notices: Mutex::new(VecDeque::new()),
        }
    }

    pub async fn push(&self, notice: Notice) {
        let mut notices = self.notices.lock().await;
        if notices.len() == self.capacity {
            notices.pop_front();
        }
        notices.push_back(notice);
    }

    /// Devolve tudo em ordem de chegada e esvazia a fila.
    pub async fn drain(&self) -> Vec<Notice> {
        self.notices.lock().await.drain(..).collect()
    }
}
