//! Registry that runs interceptors at each defeat step.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{
    BackpackLoot, CursedAmuletDonation, Defeat, DefeatInterceptor, InterceptOutcome,
    InterceptPoint, PaddedHelmetRespawn,
};
use crate::context::TurnContext;
use crate::log::LogCategory;

/// Interceptors sorted by priority. Cloning is cheap.
#[derive(Clone)]
pub struct InterceptorRegistry {
    interceptors: Arc<[Arc<dyn DefeatInterceptor>]>,
}

impl InterceptorRegistry {
    pub fn new(mut interceptors: Vec<Arc<dyn DefeatInterceptor>>) -> Self {
        interceptors.sort_by_key(|i| i.priority());
        Self {
            interceptors: interceptors.into(),
        }
    }

    /// Cursed amulet donation, padded helmet respawn and backpack loot.
    pub fn default_interceptors() -> Self {
        Self::new(vec![
            Arc::new(BackpackLoot) as Arc<dyn DefeatInterceptor>,
            Arc::new(CursedAmuletDonation),
            Arc::new(PaddedHelmetRespawn),
        ])
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = (&'static str, InterceptPoint)> + '_ {
        self.interceptors.iter().map(|i| (i.name(), i.point()))
    }

    /// Run interceptors registered at `point` until one applies.
    ///
    /// A failing interceptor is logged and skipped; the next one (or the
    /// default path) runs instead.
    pub async fn run(
        &self,
        point: InterceptPoint,
        ctx: &mut TurnContext<'_>,
        defeat: &Defeat,
    ) -> InterceptOutcome {
        for interceptor in self.interceptors.iter().filter(|i| i.point() == point) {
            if !interceptor.guard(ctx.state, defeat) {
                continue;
            }
            match interceptor.apply(ctx, defeat).await {
                Ok(InterceptOutcome::NoEffect) => {}
                Ok(applied) => {
                    debug!(
                        target: "doomspire::interceptors",
                        interceptor = interceptor.name(),
                        ?point,
                        "interceptor applied"
                    );
                    return applied;
                }
                Err(error) => {
                    warn!(
                        target: "doomspire::interceptors",
                        interceptor = interceptor.name(),
                        %error,
                        "interceptor failed, continuing"
                    );
                    ctx.log.log(
                        LogCategory::System,
                        &format!("{} failed: {error}", interceptor.name()),
                    );
                }
            }
        }
        InterceptOutcome::NoEffect
    }
}

impl Default for InterceptorRegistry {
    fn default() -> Self {
        Self::default_interceptors()
    }
}
