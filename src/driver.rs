use autorotate_accel::{classify, Commit, Hysteresis, Orientation, SampleSource};
use autorotate_display::OrientationActuator;
use tracing::{info, trace, warn};

/// Owns the per-tick state: sample source, hysteresis latch and actuator.
pub struct Driver<S, A> {
    source: S,
    actuator: A,
    hysteresis: Hysteresis,
    allow_inverted: bool,
    orientation_cmd: Option<String>,
    tick: u64,
}

impl<S: SampleSource, A: OrientationActuator> Driver<S, A> {
    pub fn new(
        source: S,
        actuator: A,
        allow_inverted: bool,
        debounce_ticks: u32,
        orientation_cmd: Option<String>,
    ) -> Self {
        Self {
            source,
            actuator,
            hysteresis: Hysteresis::new(debounce_ticks),
            allow_inverted,
            orientation_cmd,
            tick: 0,
        }
    }

    /// One polling step: read, classify, debounce, and act on a commit.
    ///
    /// Actuator failures are logged and swallowed. The commit still counts as
    /// applied so a broken display command is not retried every tick.
    pub fn tick(&mut self) -> Option<Commit> {
        let sample = self.source.read_sample();
        let observed = classify(&sample, self.allow_inverted);
        trace!(
            tick = self.tick,
            x = sample.accel.x,
            y = sample.accel.y,
            z = sample.accel.z,
            %observed,
            "Sample"
        );
        self.tick += 1;

        let commit = self.hysteresis.update(observed)?;
        info!(
            from = %commit.previous,
            to = %commit.orientation,
            family_changed = commit.family_changed,
            "Orientation changed"
        );

        if let Err(e) = self.actuator.apply(commit.orientation) {
            warn!(error = %e, orientation = %commit.orientation, "Failed to apply orientation");
        }

        if commit.family_changed {
            if let Some(cmd) = &self.orientation_cmd {
                if let Err(e) = self.actuator.run_side_effect(cmd) {
                    warn!(error = %e, "Failed to start orientation command");
                }
            }
        }

        Some(commit)
    }

    pub fn committed(&self) -> Orientation {
        self.hysteresis.committed()
    }
}
