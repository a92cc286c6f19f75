//! Line balance quality metrics (KPIs).
//!
//! Computes standard line balancing indicators from a finished balance
//! and its instance.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Cycle time (C) | Largest station load |
//! | Gap to lower bound | (C − LB) / LB, in percent |
//! | Line efficiency | Σ load / (S · C) |
//! | Total idle time | Σ (C − load) |
//! | Smoothness index | √Σ (C − load)² |
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2.2

use crate::models::{LineBalance, LineInstance};

/// Line balance performance indicators.
#[derive(Debug, Clone)]
pub struct BalanceKpi {
    /// Cycle time of the balance.
    pub cycle_time: f64,
    /// Instance lower bound.
    pub lower_bound: u64,
    /// Relative distance to the lower bound, in percent.
    pub gap_to_lower_bound_pct: f64,
    /// Fraction of staffed time spent working (0.0..1.0).
    pub line_efficiency: f64,
    /// Idle time summed over stations.
    pub total_idle_time: f64,
    /// Smoothness index; 0 for a perfectly even line.
    pub smoothness_index: f64,
    /// Station carrying the largest load (lowest index on ties).
    pub busiest_station: Option<usize>,
    /// Per-station load / cycle time, in line order.
    pub utilization_by_station: Vec<f64>,
}

impl BalanceKpi {
    /// Computes KPIs from a balance and its instance.
    pub fn calculate(balance: &LineBalance, instance: &LineInstance) -> Self {
        let cycle = balance.cycle_time;
        let lower_bound = instance.lower_bound();

        let mut total_load = 0.0;
        let mut total_idle = 0.0;
        let mut squared_idle = 0.0;
        let mut busiest: Option<(usize, f64)> = None;
        let mut utilization_by_station = Vec::with_capacity(balance.stations.len());

        for plan in &balance.stations {
            let idle = (cycle - plan.load).max(0.0);
            total_load += plan.load;
            total_idle += idle;
            squared_idle += idle * idle;
            utilization_by_station.push(if cycle > 0.0 { plan.load / cycle } else { 0.0 });
            match busiest {
                Some((_, load)) if plan.load <= load => {}
                _ => busiest = Some((plan.station, plan.load)),
            }
        }

        let gap_to_lower_bound_pct = if lower_bound == 0 {
            0.0
        } else {
            let lb = lower_bound as f64;
            (cycle - lb) / lb * 100.0
        };

        // An all-zero line has nothing to idle on.
        let line_efficiency = if cycle > 0.0 && !balance.stations.is_empty() {
            total_load / (balance.stations.len() as f64 * cycle)
        } else {
            1.0
        };

        Self {
            cycle_time: cycle,
            lower_bound,
            gap_to_lower_bound_pct,
            line_efficiency,
            total_idle_time: total_idle,
            smoothness_index: squared_idle.sqrt(),
            busiest_station: busiest.map(|(s, _)| s),
            utilization_by_station,
        }
    }

    /// Whether the balance meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_gap_pct: f64, min_efficiency: f64) -> bool {
        self.gap_to_lower_bound_pct <= max_gap_pct && self.line_efficiency >= min_efficiency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn balance_of(inst: &LineInstance, tasks: &[(usize, usize)]) -> LineBalance {
        let mut c = Candidate::new(inst);
        for s in 0..inst.station_count() {
            c.assign_worker(s, s, inst);
        }
        for &(task, station) in tasks {
            c.assign_task(station, task, inst);
        }
        c.recompute_cycle_time();
        c.to_balance(inst)
    }

    #[test]
    fn test_kpi_basic() {
        // Lower bound ceil(15 / 2) = 8; best split is 10 / 5.
        let inst = LineInstance::new(vec![vec![5, 5]; 3], &[]).unwrap();
        let balance = balance_of(&inst, &[(0, 0), (1, 0), (2, 1)]);

        let kpi = BalanceKpi::calculate(&balance, &inst);
        assert!((kpi.cycle_time - 10.0).abs() < 1e-10);
        assert_eq!(kpi.lower_bound, 8);
        assert!((kpi.gap_to_lower_bound_pct - 25.0).abs() < 1e-10);
        assert!((kpi.line_efficiency - 0.75).abs() < 1e-10); // 15 / (2 · 10)
        assert!((kpi.total_idle_time - 5.0).abs() < 1e-10);
        assert!((kpi.smoothness_index - 5.0).abs() < 1e-10);
        assert_eq!(kpi.busiest_station, Some(0));
        assert!((kpi.utilization_by_station[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_perfect_line() {
        let inst = LineInstance::new(vec![vec![1, 1]; 4], &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let balance = balance_of(&inst, &[(0, 0), (1, 0), (2, 1), (3, 1)]);

        let kpi = BalanceKpi::calculate(&balance, &inst);
        assert!(kpi.gap_to_lower_bound_pct.abs() < 1e-10);
        assert!((kpi.line_efficiency - 1.0).abs() < 1e-10);
        assert!(kpi.smoothness_index.abs() < 1e-10);
        assert!(kpi.meets_thresholds(0.0, 1.0));
    }

    #[test]
    fn test_thresholds() {
        let inst = LineInstance::new(vec![vec![5, 5]; 3], &[]).unwrap();
        let kpi = BalanceKpi::calculate(&balance_of(&inst, &[(0, 0), (1, 0), (2, 1)]), &inst);
        assert!(kpi.meets_thresholds(30.0, 0.7));
        assert!(!kpi.meets_thresholds(20.0, 0.7));
        assert!(!kpi.meets_thresholds(30.0, 0.8));
    }
}
