//! Agents
//!
//! An agent is one node of the network: a fixed behavioral kind, a strategy
//! pair (offer, threshold) and the payoff it collected in the current round.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ultimatum_events::KindLabel;

use crate::error::SimError;

/// Dense agent identifier, equal to the agent's node index in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl AgentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// Behavioral kind, fixed for the agent's lifetime.
///
/// Each kind owns the coupling between offer and threshold:
/// - `Empathetic`: offer == threshold
/// - `Pragmatic`: offer == 1 - threshold
/// - `Independent`: no coupling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Empathetic,
    Pragmatic,
    Independent,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Empathetic, Kind::Pragmatic, Kind::Independent];

    /// Applies the kind's coupling to a proposed (offer, threshold) pair.
    ///
    /// Empathetic keeps the offer, Pragmatic keeps the threshold, Independent
    /// keeps both. No range check happens here.
    pub fn constrain(self, offer: f64, threshold: f64) -> (f64, f64) {
        match self {
            Kind::Empathetic => (offer, offer),
            Kind::Pragmatic => (1.0 - threshold, threshold),
            Kind::Independent => (offer, threshold),
        }
    }

    /// Draws a fresh uniform strategy that already satisfies the coupling.
    pub fn initial_strategy<R: Rng + ?Sized>(self, rng: &mut R) -> (f64, f64) {
        let offer: f64 = rng.gen();
        let threshold = match self {
            Kind::Empathetic => offer,
            Kind::Pragmatic => 1.0 - offer,
            Kind::Independent => rng.gen(),
        };
        self.constrain(offer, threshold)
    }

    /// Perturbs the kind's free parameter(s) and re-derives the rest.
    fn perturb<R: Rng + ?Sized>(
        self,
        offer: f64,
        threshold: f64,
        noise: &Normal<f64>,
        rng: &mut R,
    ) -> (f64, f64) {
        let mut jitter = |value: f64| (value + noise.sample(rng)).clamp(0.0, 1.0);
        match self {
            Kind::Empathetic => self.constrain(jitter(offer), threshold),
            Kind::Pragmatic => self.constrain(offer, jitter(threshold)),
            Kind::Independent => {
                let offer = jitter(offer);
                let threshold = jitter(threshold);
                self.constrain(offer, threshold)
            }
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", KindLabel::from(*self))
    }
}

impl FromStr for Kind {
    type Err = SimError;

    /// Accepts full names in any case and the short labels A, B, C.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empathetic" | "a" => Ok(Kind::Empathetic),
            "pragmatic" | "b" => Ok(Kind::Pragmatic),
            "independent" | "c" => Ok(Kind::Independent),
            _ => Err(SimError::InvalidKind(s.to_string())),
        }
    }
}

impl From<Kind> for KindLabel {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Empathetic => KindLabel::Empathetic,
            Kind::Pragmatic => KindLabel::Pragmatic,
            Kind::Independent => KindLabel::Independent,
        }
    }
}

/// A single player
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    id: AgentId,
    kind: Kind,
    offer: f64,
    threshold: f64,
    payoff: f64,
}

impl Agent {
    /// Creates an agent with a uniformly drawn strategy for its kind.
    pub fn new<R: Rng + ?Sized>(id: AgentId, kind: Kind, rng: &mut R) -> Self {
        let (offer, threshold) = kind.initial_strategy(rng);
        Self {
            id,
            kind,
            offer,
            threshold,
            payoff: 0.0,
        }
    }

    /// Creates an agent with an explicit strategy, coupled per its kind.
    pub fn with_strategy(id: AgentId, kind: Kind, offer: f64, threshold: f64) -> Self {
        let mut agent = Self {
            id,
            kind,
            offer: 0.0,
            threshold: 0.0,
            payoff: 0.0,
        };
        agent.set_strategy(offer, threshold);
        agent
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn offer(&self) -> f64 {
        self.offer
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn payoff(&self) -> f64 {
        self.payoff
    }

    /// Current (offer, threshold) pair
    pub fn strategy(&self) -> (f64, f64) {
        (self.offer, self.threshold)
    }

    pub fn reset_payoff(&mut self) {
        self.payoff = 0.0;
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.payoff += amount;
    }

    /// Adopts a strategy, keeping the kind's coupling.
    ///
    /// Inputs are expected in [0, 1]; callers clamp.
    pub fn set_strategy(&mut self, offer: f64, threshold: f64) {
        let (offer, threshold) = self.kind.constrain(offer, threshold);
        self.offer = offer;
        self.threshold = threshold;
    }

    /// With probability `rate`, adds N(0, stddev) noise to the free
    /// parameter(s), clamps to [0, 1] and re-couples.
    ///
    /// Returns whether the strategy was perturbed.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, stddev: f64, rng: &mut R) -> bool {
        if rng.gen::<f64>() >= rate {
            return false;
        }
        // Normal::new accepts a negative std_dev and mirrors it.
        if !(stddev >= 0.0 && stddev.is_finite()) {
            return false;
        }
        let Ok(noise) = Normal::new(0.0, stddev) else {
            return false;
        };
        let (offer, threshold) = self.kind.perturb(self.offer, self.threshold, &noise, rng);
        self.offer = offer;
        self.threshold = threshold;
        true
    }
}
