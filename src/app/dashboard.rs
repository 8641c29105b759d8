use crate::diagnostics::{Scenario, Section};

/// One card in the system health overview
#[derive(Debug, Clone, Copy)]
pub struct HealthCard {
    pub title: &'static str,
    pub percentage: u16,
    pub status: &'static str,
    pub details: [&'static str; 2],
}

pub const HEALTH_CARDS: [HealthCard; 3] = [
    HealthCard {
        title: "RF LINK",
        percentage: 82,
        status: "FAIR",
        details: ["-67 dBm RSSI", "Ch 149 (5GHz)"],
    },
    HealthCard {
        title: "MESH NET",
        percentage: 95,
        status: "EXCELLENT",
        details: ["12 Active Nodes", "3-Hop Max"],
    },
    HealthCard {
        title: "HARDWARE",
        percentage: 78,
        status: "WARM",
        details: ["74°C Temp", "2.1A Draw"],
    },
];

/// Cursor over the scenario button grid (one column per section)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub section: usize,
    pub row: usize,
}

impl Selection {
    pub fn scenario(&self) -> Scenario {
        let scenarios = Section::ALL[self.section].scenarios();
        scenarios[self.row.min(scenarios.len() - 1)]
    }

    pub fn left(&mut self) {
        self.section = self.section.checked_sub(1).unwrap_or(Section::ALL.len() - 1);
        self.clamp_row();
    }

    pub fn right(&mut self) {
        self.section = (self.section + 1) % Section::ALL.len();
        self.clamp_row();
    }

    pub fn up(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn down(&mut self) {
        let len = Section::ALL[self.section].scenarios().len();
        self.row = (self.row + 1).min(len - 1);
    }

    fn clamp_row(&mut self) {
        let len = Section::ALL[self.section].scenarios().len();
        self.row = self.row.min(len - 1);
    }
}
