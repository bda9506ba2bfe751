//! Ordered stage driver
//!
//! A pipeline is a list of named stages run in order against a shared
//! context. The first failure stops the run; later stages never execute.

use crate::exceptions::{GauntletError, Result};
use log::{error, info};
use std::fmt;

type StageAction<'a, C> = Box<dyn FnMut(&mut C) -> Result<()> + 'a>;

/// One named step of a pipeline
pub struct Stage<'a, C> {
    name: &'static str,
    action: StageAction<'a, C>,
}

impl<'a, C> Stage<'a, C> {
    pub fn new<F>(name: &'static str, action: F) -> Self
    where
        F: FnMut(&mut C) -> Result<()> + 'a,
    {
        Self {
            name,
            action: Box::new(action),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C> fmt::Debug for Stage<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("name", &self.name).finish()
    }
}

/// Run stages in order, halting on the first failure
pub fn run_stages<C>(stages: Vec<Stage<'_, C>>, ctx: &mut C) -> Result<()> {
    let total = stages.len();
    for (i, mut stage) in stages.into_iter().enumerate() {
        info!("##### [{}/{}] {} #####", i + 1, total, stage.name);
        if let Err(e) = (stage.action)(ctx) {
            error!("❌ Stage '{}' failed: {}", stage.name, e);
            return Err(GauntletError::StageFailed {
                stage: stage.name.to_string(),
                source: Box::new(e),
            });
        }
        info!("✅ Stage '{}' passed", stage.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls {
        order: Vec<&'static str>,
    }

    fn failing(ctx: &mut Calls) -> Result<()> {
        ctx.order.push("build");
        Err(GauntletError::CommandFailed {
            command: "build/sbt clean +test".to_string(),
            exit_code: 1,
            stdout: None,
            stderr: None,
        })
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut ctx = Calls::default();
        let stages = vec![
            Stage::new("first", |c: &mut Calls| {
                c.order.push("first");
                Ok(())
            }),
            Stage::new("second", |c: &mut Calls| {
                c.order.push("second");
                Ok(())
            }),
        ];
        run_stages(stages, &mut ctx).unwrap();
        assert_eq!(ctx.order, vec!["first", "second"]);
    }

    #[test]
    fn test_first_failure_short_circuits() {
        let mut ctx = Calls::default();
        let mut later_calls = 0;
        {
            let stages = vec![
                Stage::new("build", failing),
                Stage::new("python", |_: &mut Calls| {
                    later_calls += 1;
                    Ok(())
                }),
            ];
            let err = run_stages(stages, &mut ctx).unwrap_err();
            match err {
                GauntletError::StageFailed { stage, source } => {
                    assert_eq!(stage, "build");
                    assert_eq!(source.command_exit_code(), Some(1));
                }
                other => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(later_calls, 0);
        assert_eq!(ctx.order, vec!["build"]);
    }

    #[test]
    fn test_stage_debug_shows_name() {
        let stage: Stage<'_, Calls> = Stage::new("style-checks", |_| Ok(()));
        assert_eq!(stage.name(), "style-checks");
        assert!(format!("{stage:?}").contains("style-checks"));
    }
}
