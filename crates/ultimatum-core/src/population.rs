//! Population
//!
//! Arena of agents indexed by their dense [`AgentId`], covering exactly the
//! network's node set for the whole run.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ultimatum_events::{generate_snapshot_id, AgentSnapshot, PopulationSnapshot};

use crate::agent::{Agent, AgentId, Kind};
use crate::error::{SimError, SimResult};
use crate::network::Network;

/// How kinds are assigned when the population is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KindMix {
    /// Every agent gets the same kind
    All(Kind),
    /// Each agent draws its kind uniformly from the three kinds
    #[default]
    Mixed,
}

impl KindMix {
    fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> Kind {
        match self {
            KindMix::All(kind) => kind,
            KindMix::Mixed => Kind::ALL[rng.gen_range(0..Kind::ALL.len())],
        }
    }
}

impl fmt::Display for KindMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindMix::All(kind) => write!(f, "{}", kind),
            KindMix::Mixed => f.write_str("mixed"),
        }
    }
}

impl FromStr for KindMix {
    type Err = SimError;

    /// `mixed` or any name [`Kind`] accepts.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("mixed") {
            return Ok(KindMix::Mixed);
        }
        s.parse::<Kind>().map(KindMix::All)
    }
}

impl TryFrom<String> for KindMix {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KindMix> for String {
    fn from(mix: KindMix) -> Self {
        mix.to_string()
    }
}

/// Per-kind agent counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub empathetic: usize,
    pub pragmatic: usize,
    pub independent: usize,
}

impl KindCounts {
    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Empathetic => self.empathetic,
            Kind::Pragmatic => self.pragmatic,
            Kind::Independent => self.independent,
        }
    }

    pub fn total(&self) -> usize {
        self.empathetic + self.pragmatic + self.independent
    }
}

/// All agents of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Creates one agent per network node with kinds from `mix`.
    pub fn initialize<N, R>(network: &N, mix: KindMix, rng: &mut R) -> Self
    where
        N: Network + ?Sized,
        R: Rng + ?Sized,
    {
        let agents = network
            .node_ids()
            .map(|id| {
                let kind = mix.pick(rng);
                Agent::new(id, kind, rng)
            })
            .collect();
        Self { agents }
    }

    /// Wraps prebuilt agents; ids must be `0..agents.len()` in order.
    pub fn from_agents(agents: Vec<Agent>) -> SimResult<Self> {
        for (index, agent) in agents.iter().enumerate() {
            if agent.id() != AgentId(index) {
                return Err(SimError::InvalidConfig(format!(
                    "agent at position {} has id {}",
                    index,
                    agent.id().0
                )));
            }
        }
        Ok(Self { agents })
    }

    /// Checks that the agent set equals the network's node set.
    pub fn check_covers<N: Network + ?Sized>(&self, network: &N) -> SimResult<()> {
        if self.agents.len() != network.node_count() {
            return Err(SimError::PopulationMismatch {
                expected: network.node_count(),
                actual: self.agents.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub(crate) fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn reset_payoffs(&mut self) {
        for agent in &mut self.agents {
            agent.reset_payoff();
        }
    }

    /// Arithmetic mean offer, 0.0 when empty.
    pub fn mean_offer(&self) -> f64 {
        self.mean_of(Agent::offer)
    }

    /// Arithmetic mean threshold, 0.0 when empty.
    pub fn mean_threshold(&self) -> f64 {
        self.mean_of(Agent::threshold)
    }

    pub fn mean_payoff(&self) -> f64 {
        self.mean_of(Agent::payoff)
    }

    fn mean_of(&self, value: impl Fn(&Agent) -> f64) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        self.agents.iter().map(value).sum::<f64>() / self.agents.len() as f64
    }

    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for agent in &self.agents {
            match agent.kind() {
                Kind::Empathetic => counts.empathetic += 1,
                Kind::Pragmatic => counts.pragmatic += 1,
                Kind::Independent => counts.independent += 1,
            }
        }
        counts
    }

    /// Captures every agent's strategy for an external reporting sink.
    pub fn snapshot<N: Network + ?Sized>(
        &self,
        network: &N,
        sequence: u64,
        generation: u64,
        triggered_by: &str,
    ) -> PopulationSnapshot {
        let mut snapshot =
            PopulationSnapshot::new(generate_snapshot_id(sequence), generation, triggered_by);
        snapshot.agents = self
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                agent_id: agent.id().0,
                kind: agent.kind().into(),
                offer: agent.offer(),
                threshold: agent.threshold(),
                payoff: agent.payoff(),
                degree: network.degree(agent.id()),
            })
            .collect();
        snapshot
    }
}
