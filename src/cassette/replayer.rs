//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Interactions for one port/method pair, oldest first.
type Queue = VecDeque<Interaction>;

/// Serves a cassette's interactions back in recorded order, with an
/// independent queue per port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), Queue>,
    /// Last interaction handed out, kept so callers can borrow it.
    current: Option<Interaction>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), Queue> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues, current: None }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination. The message names what was requested and
    /// what the cassette still holds.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = (port.to_string(), method.to_string());
        if !self.queues.contains_key(&key) {
            let mut available: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let next = self.queues.get_mut(&key).and_then(VecDeque::pop_front);
        let Some(interaction) = next else {
            panic!(
                "Cassette exhausted: all interactions for port={port:?} method={method:?} \
                 have been consumed. Last interaction was seq={}.",
                self.current.as_ref().map_or(0, |i| i.seq),
            );
        };
        self.current.insert(interaction)
    }
}
