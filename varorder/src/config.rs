use env_param::EnvParam;

/// Bonus added to the weight of a dependency whose target is a goal variable, when breaking cycles.
///
/// It must dominate any natural weight (a count of operators and axioms) so that edges towards goal
/// variables are only dropped when keeping them would close a cycle with other goal edges.
pub const DEFAULT_GOAL_BIAS: u32 = 100_000;

static RETAIN_ALL_VARIABLES: EnvParam<bool> = EnvParam::new("VARORDER_RETAIN_ALL_VARIABLES", "false");
static GOAL_BIAS: EnvParam<u32> = EnvParam::new("VARORDER_GOAL_BIAS", "100000");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OrderingConfig {
    /// If set, variables that are irrelevant to the goal are kept in the final order.
    pub retain_all_variables: bool,
    pub goal_bias: u32,
}

impl OrderingConfig {
    /// Configuration independent of the environment.
    pub const fn new() -> Self {
        OrderingConfig {
            retain_all_variables: false,
            goal_bias: DEFAULT_GOAL_BIAS,
        }
    }

    pub const fn retaining_all_variables(self) -> Self {
        OrderingConfig {
            retain_all_variables: true,
            ..self
        }
    }
}

impl Default for OrderingConfig {
    /// Reads `VARORDER_RETAIN_ALL_VARIABLES` and `VARORDER_GOAL_BIAS` from the environment.
    fn default() -> Self {
        OrderingConfig {
            retain_all_variables: RETAIN_ALL_VARIABLES.get(),
            goal_bias: GOAL_BIAS.get(),
        }
    }
}
