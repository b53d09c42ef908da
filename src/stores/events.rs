use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

// Mutation notifications pushed to store subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    LoadingInitial(bool),
    Loading(bool),
    ActivityUpserted(String),
    ActivityRemoved(String),
}

// Handle returned by `subscribe`. Dropping it detaches the subscriber on the
// next emit; `unsubscribe` detaches it immediately.
pub struct Subscription {
    id: u64,
    receiver: UnboundedReceiver<StoreEvent>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn try_next(&mut self) -> Option<StoreEvent> {
        self.receiver.try_recv().ok()
    }

    pub async fn next(&mut self) -> Option<StoreEvent> {
        self.receiver.recv().await
    }
}

pub(crate) struct Subscribers {
    next_id: u64,
    senders: Vec<(u64, UnboundedSender<StoreEvent>)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            senders: Vec::new(),
        }
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.next_id;
        self.next_id += 1;
        self.senders.push((id, tx));
        Subscription { id, receiver: rx }
    }

    pub fn unsubscribe(&mut self, id: u64) {
        self.senders.retain(|(sub_id, _)| *sub_id != id);
    }

    pub fn emit(&mut self, event: StoreEvent) {
        self.senders.retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }
}
