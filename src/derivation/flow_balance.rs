use crate::numeric::round_to;

/// 유량 수지 결과 [선택된 유량 단위].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowBalance {
    pub feed_flow: f64,
    pub concentrate_flow: f64,
}

impl FlowBalance {
    pub const ZERO: FlowBalance = FlowBalance {
        feed_flow: 0.0,
        concentrate_flow: 0.0,
    };
}

/// 목표 투과수량과 회수율(%)로 공급수/농축수 유량을 계산한다.
///
/// 회수율이 (0, 100) 범위를 벗어나면 두 유량 모두 0을 돌려준다.
/// 결과는 소수 둘째 자리로 반올림한다.
pub fn flow_balance(permeate_flow: f64, recovery_percent: f64) -> FlowBalance {
    if !(recovery_percent > 0.0 && recovery_percent < 100.0) {
        return FlowBalance::ZERO;
    }
    let feed = permeate_flow / (recovery_percent / 100.0);
    let concentrate = feed - permeate_flow;
    FlowBalance {
        feed_flow: round_to(feed, 2),
        concentrate_flow: round_to(concentrate, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventy_five_percent_recovery() {
        let fb = flow_balance(30.0, 75.0);
        assert_eq!(fb.feed_flow, 40.0);
        assert_eq!(fb.concentrate_flow, 10.0);
    }

    #[test]
    fn out_of_range_recovery_zeroes_flows() {
        for r in [0.0, 100.0, 140.0, -5.0, f64::NAN] {
            assert_eq!(flow_balance(30.0, r), FlowBalance::ZERO, "recovery {r}");
        }
    }
}
