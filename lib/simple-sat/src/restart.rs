use crate::options::Options;
use crate::utils::luby;

#[derive(Debug)]
pub struct RestartStrategy {
    pub is_luby: bool,
    pub restart_init: usize,
    pub restart_inc: f64,
}

impl RestartStrategy {
    pub fn from_options(options: &Options) -> Self {
        Self {
            is_luby: options.is_luby,
            restart_init: options.restart_init,
            restart_inc: options.restart_inc,
        }
    }

    /// Number of conflicts allowed before the `restarts`-th restart.
    pub fn num_confl(&self, restarts: usize) -> usize {
        let restart_base = if self.is_luby {
            luby(self.restart_inc, restarts as u32)
        } else {
            self.restart_inc.powi(restarts as i32)
        };

        (restart_base * self.restart_init as f64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luby_restarts() {
        let strategy = RestartStrategy {
            is_luby: true,
            restart_init: 100,
            restart_inc: 2.0,
        };
        let seq = (0..7).map(|i| strategy.num_confl(i)).collect::<Vec<_>>();
        assert_eq!(seq, vec![100, 100, 200, 100, 100, 200, 400]);
    }

    #[test]
    fn test_geometric_restarts() {
        let strategy = RestartStrategy {
            is_luby: false,
            restart_init: 100,
            restart_inc: 1.5,
        };
        assert_eq!(strategy.num_confl(0), 100);
        assert_eq!(strategy.num_confl(2), 225);
    }
}
