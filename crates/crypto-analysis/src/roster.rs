//! Agent & Task Roster
//!
//! Declarative tables of the six analyst personas and the six pipeline tasks,
//! plus the consistency check that ties them together:
//!
//! ```text
//!  #  task                        agent                       lookups
//!  1  market_trend_analysis       Crypto Market Analyst       web, finance, wiki
//!  2  technology_analysis         Blockchain Technology ...   web, wiki
//!  3  regulatory_analysis         Regulatory Compliance ...   web, finance, wiki
//!  4  risk_evaluation             Crypto Risk Analyst         web, finance, wiki
//!  5  price_prediction            Crypto Price Movement ...   web, finance, wiki
//!  6  investment_recommendation   Crypto Investment ...       (none, synthesis)
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::model::Capability;

/// Persona identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    MarketAnalyst,
    TechnologyAnalyst,
    RegulatoryAnalyst,
    RiskAnalyst,
    PriceMovementAnalyst,
    InvestmentAdvisor,
}

/// Task identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    MarketTrendAnalysis,
    TechnologyAnalysis,
    RegulatoryAnalysis,
    RiskEvaluation,
    PricePrediction,
    InvestmentRecommendation,
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaskKind::MarketTrendAnalysis => "market_trend_analysis",
            TaskKind::TechnologyAnalysis => "technology_analysis",
            TaskKind::RegulatoryAnalysis => "regulatory_analysis",
            TaskKind::RiskEvaluation => "risk_evaluation",
            TaskKind::PricePrediction => "price_prediction",
            TaskKind::InvestmentRecommendation => "investment_recommendation",
        };
        f.write_str(name)
    }
}

/// A configured persona
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentDescriptor {
    pub kind: AgentKind,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
    pub capabilities: &'static [Capability],
}

impl AgentDescriptor {
    pub fn capability_set(&self) -> BTreeSet<Capability> {
        self.capabilities.iter().copied().collect()
    }

    /// Persona prompt; tool instructions are appended by the agent loop
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}.\n{backstory}\n\nYour personal goal is: {goal}\n\n\
             Work only on the task you are given. When you have what you need, \
             reply with your complete final report as plain text.",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal,
        )
    }
}

/// One pipeline stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskDescriptor {
    pub kind: TaskKind,
    pub agent: AgentKind,
    pub description: &'static str,
    pub capabilities: &'static [Capability],
}

impl TaskDescriptor {
    pub fn capability_set(&self) -> BTreeSet<Capability> {
        self.capabilities.iter().copied().collect()
    }
}

const ALL_LOOKUPS: &[Capability] = &[
    Capability::WebSearch,
    Capability::FinancialSearch,
    Capability::EncyclopediaSearch,
];

const RESEARCH_LOOKUPS: &[Capability] = &[Capability::WebSearch, Capability::EncyclopediaSearch];

const NO_LOOKUPS: &[Capability] = &[];

pub const MARKET_ANALYST: AgentDescriptor = AgentDescriptor {
    kind: AgentKind::MarketAnalyst,
    role: "Crypto Market Analyst",
    goal: "Provide cutting-edge analysis of the cryptocurrency market trends",
    backstory: "An expert with deep insights into the volatile crypto market, leveraging \
                technical analysis and market sentiment to predict future movements.",
    capabilities: ALL_LOOKUPS,
};

pub const TECHNOLOGY_ANALYST: AgentDescriptor = AgentDescriptor {
    kind: AgentKind::TechnologyAnalyst,
    role: "Blockchain Technology Analyst",
    goal: "Deliver in-depth analysis of blockchain technologies behind cryptocurrencies",
    backstory: "Armed with a computer science background and a passion for blockchain \
                technology, you dissect the technical aspects and potential of various \
                cryptocurrencies.",
    capabilities: RESEARCH_LOOKUPS,
};

pub const REGULATORY_ANALYST: AgentDescriptor = AgentDescriptor {
    kind: AgentKind::RegulatoryAnalyst,
    role: "Regulatory Compliance Analyst",
    goal: "Keep abreast of and analyze the global cryptocurrency regulations",
    backstory: "As someone with a keen interest in finance and law, you stay updated on the \
                ever-evolving regulatory landscape of the crypto world.",
    capabilities: ALL_LOOKUPS,
};

pub const INVESTMENT_ADVISOR: AgentDescriptor = AgentDescriptor {
    kind: AgentKind::InvestmentAdvisor,
    role: "Crypto Investment Strategist",
    goal: "Craft strategic investment advice based on comprehensive crypto market analyses",
    backstory: "As a seasoned investor in cryptocurrencies, you blend various analytical \
                insights to formulate robust investment strategies.",
    capabilities: NO_LOOKUPS,
};

pub const RISK_ANALYST: AgentDescriptor = AgentDescriptor {
    kind: AgentKind::RiskAnalyst,
    role: "Crypto Risk Analyst",
    goal: "Conduct a thorough risk assessment of cryptocurrencies",
    backstory: "An expert in financial risk assessment with a focus on the volatile crypto \
                market, using statistical tools and historical data to evaluate the risk \
                associated with different cryptocurrencies.",
    capabilities: ALL_LOOKUPS,
};

pub const PRICE_MOVEMENT_ANALYST: AgentDescriptor = AgentDescriptor {
    kind: AgentKind::PriceMovementAnalyst,
    role: "Crypto Price Movement Analyst",
    goal: "Analyze and predict future price movements of cryptocurrencies using technical analysis",
    backstory: "Specializing in technical analysis, you use chart patterns, trading volumes, \
                and historical price data to forecast the future price movements of \
                cryptocurrencies.",
    capabilities: ALL_LOOKUPS,
};

/// Agents in roster order
pub const AGENTS: [AgentDescriptor; 6] = [
    MARKET_ANALYST,
    RISK_ANALYST,
    TECHNOLOGY_ANALYST,
    REGULATORY_ANALYST,
    PRICE_MOVEMENT_ANALYST,
    INVESTMENT_ADVISOR,
];

const MARKET_TREND_ANALYSIS: &str = "\
Analyze current trends, sentiment from social media, news, and technical indicators for the cryptocurrency.
Focus on identifying key support and resistance levels, trend patterns, and potential breakout or breakdown points. Use the necessary tools to obtain the required information.
Your final report MUST include a comprehensive analysis of the current market trend, sentiment shifts, and potential impacts on the cryptocurrency. You MUST provide very SPECIFIC details.
Make sure to use the most recent data possible. Make sure to use the appropriate tools that you have to obtain the best results.";

const TECHNOLOGY_ANALYSIS: &str = "\
Evaluate the technological aspects and development progress of the cryptocurrency.
Analyze aspects like blockchain efficiency, smart contract functionality, and any recent technological updates.
Make sure to use the appropriate tools that you have to obtain the best results.
Your final report MUST include an assessment of the cryptocurrency's technological standing, its advancements, and potential future developments. You MUST provide very SPECIFIC details.
Make sure to use the most recent data possible.";

const REGULATORY_ANALYSIS: &str = "\
Monitor and analyze regulatory changes and announcements in the region impacting cryptocurrencies.
Assess how these regulatory shifts could affect the market and specific cryptocurrencies.
Make sure to use the appropriate tools that you have to obtain the best results.
Your final report must highlight the significant regulatory changes, their potential impact on the market, and any specific cryptocurrencies that might be affected. You MUST provide very SPECIFIC details.";

const RISK_EVALUATION: &str = "\
Perform a comprehensive risk analysis for the cryptocurrency. Assess factors like market volatility, liquidity, historical performance, and exposure to regulatory changes. Use historical data and statistical tools to evaluate the risk.
Your final report MUST include an assessment of the overall risk profile, potential high-risk scenarios, and recommended risk mitigation strategies for the cryptocurrency. You MUST provide very SPECIFIC details.
Make sure to use the most recent data possible.";

const PRICE_PREDICTION: &str = "\
Use technical analysis to predict future price movements of the cryptocurrency. Focus on identifying key support and resistance levels and projected short term and long term price predictions.
Your final report MUST include specific price projections, support and resistance levels and price movement predictions.
Make sure to use the most recent data possible.";

const INVESTMENT_RECOMMENDATION: &str = "\
Review and synthesize the analyses provided by the Crypto Market Analyst, Blockchain Technology Analyst, Regulatory Compliance Analyst, Risk Analyst and Price Movement Analyst.

Formulate a comprehensive investment strategy based on these insights.
Your final report MUST include a detailed investment recommendation for the cryptocurrency, considering market trends, technological developments, regulatory changes, risk analysis and price movement analysis. You MUST provide very SPECIFIC details.
Make sure to include potential risks and opportunities, and tailor the advice to the customer's specific needs.";

/// Tasks in execution order
pub const TASKS: [TaskDescriptor; 6] = [
    TaskDescriptor {
        kind: TaskKind::MarketTrendAnalysis,
        agent: AgentKind::MarketAnalyst,
        description: MARKET_TREND_ANALYSIS,
        capabilities: ALL_LOOKUPS,
    },
    TaskDescriptor {
        kind: TaskKind::TechnologyAnalysis,
        agent: AgentKind::TechnologyAnalyst,
        description: TECHNOLOGY_ANALYSIS,
        capabilities: RESEARCH_LOOKUPS,
    },
    TaskDescriptor {
        kind: TaskKind::RegulatoryAnalysis,
        agent: AgentKind::RegulatoryAnalyst,
        description: REGULATORY_ANALYSIS,
        capabilities: ALL_LOOKUPS,
    },
    TaskDescriptor {
        kind: TaskKind::RiskEvaluation,
        agent: AgentKind::RiskAnalyst,
        description: RISK_EVALUATION,
        capabilities: ALL_LOOKUPS,
    },
    TaskDescriptor {
        kind: TaskKind::PricePrediction,
        agent: AgentKind::PriceMovementAnalyst,
        description: PRICE_PREDICTION,
        capabilities: ALL_LOOKUPS,
    },
    TaskDescriptor {
        kind: TaskKind::InvestmentRecommendation,
        agent: AgentKind::InvestmentAdvisor,
        description: INVESTMENT_RECOMMENDATION,
        capabilities: NO_LOOKUPS,
    },
];

/// Validated agent and task tables for a run
#[derive(Clone, Debug)]
pub struct Roster {
    agents: Vec<AgentDescriptor>,
    tasks: Vec<TaskDescriptor>,
}

impl Roster {
    /// Build a roster, rejecting inconsistent tables
    pub fn new(agents: Vec<AgentDescriptor>, tasks: Vec<TaskDescriptor>) -> Result<Self> {
        let roster = Self { agents, tasks };
        roster.validate()?;
        Ok(roster)
    }

    /// The six crypto analysts and their six tasks
    pub fn standard() -> Result<Self> {
        Self::new(AGENTS.to_vec(), TASKS.to_vec())
    }

    pub fn agents(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub fn tasks(&self) -> &[TaskDescriptor] {
        &self.tasks
    }

    pub fn agent(&self, kind: AgentKind) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.kind == kind)
    }

    /// The task whose output is the run's result
    pub fn final_task(&self) -> Option<&TaskDescriptor> {
        self.tasks.last()
    }

    fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(AnalysisError::InvalidRoster("no tasks declared".into()));
        }

        let mut agent_kinds = HashSet::new();
        for agent in &self.agents {
            if !agent_kinds.insert(agent.kind) {
                return Err(AnalysisError::InvalidRoster(format!(
                    "agent {:?} declared twice",
                    agent.kind
                )));
            }
        }

        let mut task_kinds = HashSet::new();
        for task in &self.tasks {
            if !task_kinds.insert(task.kind) {
                return Err(AnalysisError::InvalidRoster(format!(
                    "task {} declared twice",
                    task.kind
                )));
            }

            let agent = self.agent(task.agent).ok_or_else(|| {
                AnalysisError::InvalidRoster(format!(
                    "task {} references undeclared agent {:?}",
                    task.kind, task.agent
                ))
            })?;

            let granted = agent.capability_set();
            let missing: Vec<String> = task
                .capability_set()
                .difference(&granted)
                .map(ToString::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(AnalysisError::InvalidRoster(format!(
                    "task {} requests {} which {} cannot use",
                    task.kind,
                    missing.join(", "),
                    agent.role
                )));
            }
        }

        Ok(())
    }
}
