use std::collections::VecDeque;

use log::{debug, info, trace};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::MAX_MSG_LEN;

/// Outbound side of a session: commands are queued here and written out in
/// one go after each batch of inbound lines has been handled.
#[derive(Default)]
pub struct IrcContext {
    pub(crate) send_queue: VecDeque<String>,
}

impl IrcContext {
    pub(crate) fn queue(&mut self, msg: &str) {
        let msg = msg.replace('\r', "").replace('\n', "");
        let max = MAX_MSG_LEN - "\r\n".len();

        if msg.len() <= max {
            self.send_queue.push_back(msg + "\r\n");
            return;
        }

        let mut rest = msg.as_str();
        while !rest.is_empty() {
            let mut end = max.min(rest.len());
            while !rest.is_char_boundary(end) {
                end -= 1;
            }
            self.send_queue.push_back(rest[..end].to_owned() + "\r\n");
            rest = &rest[end..];
        }
    }

    pub fn nick(&mut self, nick: &str) {
        self.queue(&format!("NICK {}", nick));
    }

    pub fn user(&mut self, user: &str, real: &str) {
        self.queue(&format!("USER {} 0 * :{}", user, real));
    }

    pub fn join(&mut self, channel: &str) {
        info!("Joining {channel}");
        self.queue(&format!("JOIN {}", channel));
    }

    pub fn pong(&mut self, token: &str) {
        debug!("PONG {}", token);
        self.queue(&format!("PONG :{}", token));
    }

    pub fn quit(&mut self, message: &str) {
        self.queue(&format!("QUIT :{}", message));
    }

    pub fn is_empty(&self) -> bool {
        self.send_queue.is_empty()
    }

    pub(crate) async fn flush<W: AsyncWrite + Unpin>(
        &mut self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        while let Some(msg) = self.send_queue.pop_front() {
            trace!(">> {}", msg.trim_end());
            writer.write_all(msg.as_bytes()).await?;
        }
        writer.flush().await
    }
}
