use crate::error::SweepError;
use crate::util;
use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_SERVERS: [usize; 4] = [2, 5, 8, 10];
const DEFAULT_CLIENTS: [usize; 4] = [2, 5, 8, 10];
const DEFAULT_RATIOS: [f64; 3] = [0.2, 0.5, 0.8];

/// The three parameter domains of a sweep. Points are enumerated with servers
/// as the outer loop, clients as the middle loop and ratios as the inner loop;
/// this order is the row order of the results file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterGrid {
    pub servers: Vec<usize>,
    pub clients: Vec<usize>,
    pub ratios: Vec<f64>,
}

impl Default for ParameterGrid {
    fn default() -> Self {
        Self::new(
            DEFAULT_SERVERS.to_vec(),
            DEFAULT_CLIENTS.to_vec(),
            DEFAULT_RATIOS.to_vec(),
        )
    }
}

impl ParameterGrid {
    pub fn new(
        servers: Vec<usize>,
        clients: Vec<usize>,
        ratios: Vec<f64>,
    ) -> Self {
        Self {
            servers,
            clients,
            ratios,
        }
    }

    /// Number of points in the grid.
    pub fn len(&self) -> usize {
        self.servers.len() * self.clients.len() * self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that every ratio is within `[0, 1]` and that there's no zero
    /// server or client count. Empty domains are accepted.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.servers.contains(&0) {
            return Err(SweepError::ZeroCount {
                parameter: "server count",
            });
        }
        if self.clients.contains(&0) {
            return Err(SweepError::ZeroCount {
                parameter: "client count",
            });
        }
        if let Some(&ratio) = self
            .ratios
            .iter()
            .find(|ratio| !(0.0..=1.0).contains(*ratio))
        {
            // NaN is never contained in the range, so it's also caught here
            return Err(SweepError::InvalidRatio { ratio });
        }
        Ok(())
    }

    /// Enumerates all points in sweep order.
    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
        self.servers
            .iter()
            .flat_map(move |&servers| {
                self.clients.iter().flat_map(move |&clients| {
                    self.ratios.iter().map(move |&ratio| (servers, clients, ratio))
                })
            })
            .enumerate()
            .map(|(index, (servers, clients, ratio))| SweepPoint {
                index,
                servers,
                clients,
                ratio,
            })
    }
}

/// A single combination of the grid, together with its position in sweep
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub index: usize,
    pub servers: usize,
    pub clients: usize,
    pub ratio: f64,
}

impl SweepPoint {
    /// The varying arguments of a benchmark invocation: server count, client
    /// count and ratio.
    pub fn to_args(&self) -> Vec<String> {
        args![self.servers, self.clients, util::format_ratio(self.ratio)]
    }
}

impl fmt::Display for SweepPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "point #{} (servers = {} | clients = {} | ratio = {})",
            self.index,
            self.servers,
            self.clients,
            util::format_ratio(self.ratio)
        )
    }
}
