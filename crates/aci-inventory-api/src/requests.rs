//! Request types for the inventory module

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Kind of inventory data to retrieve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    Fantray,
    PowerSupplies,
    SupervisorModule,
    LinecardModule,
    Interfaces,
    Firmware,
    /// Every node of the fabric (`topSystem`)
    Nodes,
    /// Every class of the default class table, in table order
    #[default]
    All,
}

impl Command {
    /// All accepted commands in declaration order
    pub const ALL: [Command; 8] = [
        Command::Fantray,
        Command::PowerSupplies,
        Command::SupervisorModule,
        Command::LinecardModule,
        Command::Interfaces,
        Command::Firmware,
        Command::Nodes,
        Command::All,
    ];

    /// Parameter spelling of the command
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Fantray => "fantray",
            Command::PowerSupplies => "power-supplies",
            Command::SupervisorModule => "supervisor-module",
            Command::LinecardModule => "linecard-module",
            Command::Interfaces => "interfaces",
            Command::Firmware => "firmware",
            Command::Nodes => "nodes",
            Command::All => "all",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let choices: Vec<&str> = Command::ALL.iter().map(|c| c.as_str()).collect();
                ParseError::new("command", s, &choices)
            })
    }
}

/// MO query (`brief`) or subtree query (`detail`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Brief,
    Detail,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Brief => f.write_str("brief"),
            Level::Detail => f.write_str("detail"),
        }
    }
}

impl FromStr for Level {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brief" => Ok(Level::Brief),
            "detail" => Ok(Level::Detail),
            other => Err(ParseError::new("level", other, &["brief", "detail"])),
        }
    }
}

/// Connection protocol to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    /// URL scheme
    #[must_use]
    pub fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

impl FromStr for Protocol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(ParseError::new("protocol", other, &["http", "https"])),
        }
    }
}

/// A single inventory query against one fabric node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRequest {
    pub node_id: u32,
    #[serde(default)]
    pub command: Command,
    #[serde(default)]
    pub level: Level,
}

impl InventoryRequest {
    pub fn new(node_id: u32, command: Command, level: Level) -> Self {
        Self {
            node_id,
            command,
            level,
        }
    }

    /// Node id as it appears in REST paths
    #[must_use]
    pub fn node(&self) -> String {
        self.node_id.to_string()
    }
}

/// Body of `POST api/aaaLogin.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub aaa_user: AaaUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AaaUser {
    pub attributes: AaaUserAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AaaUserAttributes {
    pub name: String,
    pub pwd: String,
}

impl LoginRequest {
    pub fn new(name: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            aaa_user: AaaUser {
                attributes: AaaUserAttributes {
                    name: name.into(),
                    pwd: pwd.into(),
                },
            },
        }
    }
}
