use sketch_types::{ServerMessage, SessionId};

/// Who an outbound message is addressed to. `Room` members are resolved when
/// the message is dispatched, not when it is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Room,
    RoomExcept(SessionId),
    Session(SessionId),
}

#[derive(Debug, Clone)]
pub struct Outbound {
    pub to: Recipient,
    pub message: ServerMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start the one-second round ticker for this generation.
    Start { generation: u64 },
    Stop,
}

/// Follow-up step to run after a phase-specific delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    NextRound { generation: u64 },
    GameOver { generation: u64 },
    Reset { generation: u64 },
}

impl Scheduled {
    pub fn generation(&self) -> u64 {
        match self {
            Scheduled::NextRound { generation }
            | Scheduled::GameOver { generation }
            | Scheduled::Reset { generation } => *generation,
        }
    }
}

/// Everything a room operation wants the outside world to do.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub outbound: Vec<Outbound>,
    pub timer: Option<TimerCommand>,
    pub scheduled: Option<Scheduled>,
    /// Sessions that no longer belong to the room.
    pub released: Vec<SessionId>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_room(&mut self, message: ServerMessage) {
        self.push(Recipient::Room, message);
    }

    pub fn to_room_except(&mut self, session: SessionId, message: ServerMessage) {
        self.push(Recipient::RoomExcept(session), message);
    }

    pub fn to_session(&mut self, session: SessionId, message: ServerMessage) {
        self.push(Recipient::Session(session), message);
    }

    fn push(&mut self, to: Recipient, message: ServerMessage) {
        self.outbound.push(Outbound { to, message });
    }

    /// Append `other`; its timer and scheduled step win when both are set.
    pub fn merge(&mut self, other: Effects) {
        self.outbound.extend(other.outbound);
        self.released.extend(other.released);
        if other.timer.is_some() {
            self.timer = other.timer;
        }
        if other.scheduled.is_some() {
            self.scheduled = other.scheduled;
        }
    }

    pub fn stops_timer(&self) -> bool {
        matches!(self.timer, Some(TimerCommand::Stop))
    }

    pub fn is_empty(&self) -> bool {
        self.outbound.is_empty()
            && self.timer.is_none()
            && self.scheduled.is_none()
            && self.released.is_empty()
    }

    pub fn messages(&self) -> impl Iterator<Item = &ServerMessage> {
        self.outbound.iter().map(|outbound| &outbound.message)
    }
}
