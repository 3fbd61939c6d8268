//! Balance simulator for Silent Depths.
//! Run with: cargo test simulate_session -- --nocapture

#[cfg(test)]
mod tests {
    use crate::game::logic::{self, ENERGY_MAX};
    use crate::game::state::{GameState, UpgradeKind};

    /// Greedy purchase order. Lanterns early (zones are the point of the
    /// game), then nets for throughput, oysters as pearls allow, spirit
    /// whenever an artifact shows up.
    const BUY_ORDER: [UpgradeKind; 4] = [
        UpgradeKind::Lanterns,
        UpgradeKind::Nets,
        UpgradeKind::Oysters,
        UpgradeKind::Spirit,
    ];

    fn report(state: &GameState, seconds: u32, purchases: u32, casts: u32) {
        let minutes = seconds / 60;
        eprintln!("┌─── {}m{:02}s ──────────────────────────", minutes, seconds % 60);
        eprintln!(
            "│ fish {}  pearls {}  artifacts {}",
            logic::format_number(state.fish),
            logic::format_number(state.pearls),
            logic::format_number(state.artifacts),
        );
        eprintln!(
            "│ zone {} ({})  casts {}  energy {:.0}",
            state.current_zone,
            state.zone().name,
            casts,
            state.boat_energy,
        );
        eprintln!(
            "│ levels: nets {}  oysters {}  lanterns {}  spirit {}  (purchases {})",
            state.upgrades.nets,
            state.upgrades.oysters,
            state.upgrades.lanterns,
            state.upgrades.spirit,
            purchases,
        );
        let unlocked = state.achievements.iter().filter(|a| a.unlocked).count();
        eprintln!("│ achievements {}/{}", unlocked, state.achievements.len());
        eprintln!("└──────────────────────────────────────");
    }

    /// Simulate an attentive player for `total_seconds`: two casts per
    /// second when energy allows, greedy purchases, ticks at wall-clock
    /// pace. Invariants are asserted every simulated second.
    fn simulate(total_seconds: u32) {
        let mut state = GameState::new();
        state.rng_state = 0xC0FFEE;

        let mut purchases: u32 = 0;
        let mut casts: u32 = 0;
        let report_times = [30u32, 120, 300, 900, 1800, 3600];
        let mut next_report = 0usize;

        eprintln!("\n── Silent Depths session simulator: {}m ──", total_seconds / 60);

        for second in 1..=total_seconds {
            let now = second as f64 * 1000.0;

            for _ in 0..2 {
                if logic::cast(&mut state, None).is_some() {
                    casts += 1;
                }
            }

            logic::tick(&mut state, logic::TICKS_PER_SEC, now);

            // Buy everything affordable, best-first.
            loop {
                let bought = BUY_ORDER
                    .iter()
                    .any(|kind| logic::buy_upgrade(&mut state, *kind, now));
                if !bought {
                    break;
                }
                purchases += 1;
            }

            assert!(
                (0.0..=ENERGY_MAX).contains(&state.boat_energy),
                "energy out of bounds at {second}s: {}",
                state.boat_energy
            );
            assert!(
                state.fish >= 0.0 && state.pearls >= 0.0 && state.artifacts >= 0.0,
                "negative balance at {second}s"
            );

            if next_report < report_times.len() && second >= report_times[next_report] {
                report(&state, second, purchases, casts);
                next_report += 1;
            }
        }

        eprintln!("── final ──");
        report(&state, total_seconds, purchases, casts);

        // A session this long should have made real progress.
        assert!(state.depth > 0);
        assert!(state.total_fish_caught > 0.0);
    }

    #[test]
    fn simulate_session_one_hour() {
        simulate(3600);
    }

    #[test]
    fn simulate_session_five_minutes() {
        simulate(300);
    }
}
