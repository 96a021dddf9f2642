//! Cost projection of a meter's recorded consumption under every price plan.

use std::collections::BTreeMap;

use itertools::{Itertools, MinMaxResult};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    plan::PricePlan,
    prelude::instrument,
    reading::{MeterId, Reading, ReadingSource},
};

/// Scale at which money quotients are rounded, in decimal places.
const CURRENCY_SCALE: u32 = 2;

const SECONDS_PER_HOUR: i64 = 3600;

/// Arithmetic failure while projecting costs.
///
/// Deliberately a hard error: a meter whose readings span no time interval
/// has no average hourly consumption, and surfacing zero or infinity instead
/// would be a silently wrong bill.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CostError {
    #[error("division by zero: the readings do not span a non-zero time interval")]
    DivisionByZero,
}

/// Projected cost per plan name.
pub type CostResult = BTreeMap<String, Decimal>;

/// Stateless calculation engine over two injected collaborators: a reading
/// source and a fixed plan registry.
#[must_use]
pub struct CostEstimator<S> {
    plans: Vec<PricePlan>,
    source: S,
}

impl<S: ReadingSource> CostEstimator<S> {
    pub const fn new(plans: Vec<PricePlan>, source: S) -> Self {
        Self { plans, source }
    }

    /// Project the meter's consumption cost under every configured plan.
    ///
    /// Returns [`None`] for a meter unknown to the reading source. A meter
    /// that *is* known but has no usable readings is a different outcome:
    /// the combiner fails with [`CostError::DivisionByZero`], which aborts
    /// the whole multi-plan computation.
    #[instrument(skip(self), fields(meter_id = %meter_id))]
    pub fn costs_per_plan(&self, meter_id: &MeterId) -> Result<Option<CostResult>, CostError> {
        let Some(readings) = self.source.readings(meter_id) else {
            return Ok(None);
        };
        let mut costs = CostResult::new();
        for plan in &self.plans {
            // Duplicate plan names overwrite silently; uniqueness is the
            // plan book's responsibility.
            costs.insert(plan.name.clone(), consumption_cost(&readings, plan)?);
        }
        Ok(Some(costs))
    }

    /// Rank the plans from cheapest to priciest for the meter, keeping at
    /// most `limit` entries when given.
    pub fn recommend(
        &self,
        meter_id: &MeterId,
        limit: Option<usize>,
    ) -> Result<Option<Vec<(String, Decimal)>>, CostError> {
        let Some(costs) = self.costs_per_plan(meter_id)? else {
            return Ok(None);
        };
        let mut ranking = costs.into_iter().sorted_by_key(|(_, cost)| *cost).collect_vec();
        if let Some(limit) = limit {
            ranking.truncate(limit);
        }
        Ok(Some(ranking))
    }
}

/// Arithmetic mean of the reading values, rounded half-up at the currency
/// scale. The sum itself is never rounded, only the quotient.
pub fn average_reading(readings: &[Reading]) -> Result<Decimal, CostError> {
    let sum: Decimal = readings.iter().map(|reading| reading.value).sum();
    let count = Decimal::from(readings.len());
    let average = sum.checked_div(count).ok_or(CostError::DivisionByZero)?;
    Ok(round_half_up(average))
}

/// Hours between the chronologically earliest and latest reading, as an
/// unrounded decimal.
///
/// The scan is order-independent, so shuffled input yields the same span.
/// Zero or one reading spans zero hours. Sub-second differences are
/// truncated toward zero at the seconds boundary before the conversion, and
/// the division by 3600 keeps full precision — in contrast to
/// [`average_reading`], which does round.
pub fn elapsed_hours(readings: &[Reading]) -> Decimal {
    match readings.iter().map(|reading| reading.time).minmax() {
        MinMaxResult::MinMax(earliest, latest) => {
            Decimal::from((latest - earliest).num_seconds()) / Decimal::from(SECONDS_PER_HOUR)
        }
        MinMaxResult::NoElements | MinMaxResult::OneElement(_) => Decimal::ZERO,
    }
}

/// Projected cost of the readings under a single plan:
/// `round_half_up(average / elapsed_hours) × unit_rate`.
///
/// The averaged cost is rounded half-up at the currency scale; the final
/// multiplication is not rounded and keeps whatever precision it yields.
/// Peak-time multipliers on the plan do not participate.
pub fn consumption_cost(readings: &[Reading], plan: &PricePlan) -> Result<Decimal, CostError> {
    let average = average_reading(readings)?;
    let hours = elapsed_hours(readings);
    let averaged_cost =
        round_half_up(average.checked_div(hours).ok_or(CostError::DivisionByZero)?);
    Ok(averaged_cost * plan.unit_rate)
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::store::InMemoryReadingStore;

    fn reading(time: &str, value: Decimal) -> Reading {
        Reading { time: time.parse().unwrap(), value }
    }

    /// Out of chronological order on purpose: the span scan must not depend
    /// on input order.
    fn readings() -> Vec<Reading> {
        vec![
            reading("2021-01-04T23:25:35Z", dec!(1111.11)),
            reading("2020-12-12T12:12:21Z", dec!(200)),
            reading("2019-08-08T08:08:08Z", dec!(3333.44)),
        ]
    }

    fn plan(name: &str, unit_rate: Decimal) -> PricePlan {
        PricePlan {
            name: name.to_string(),
            supplier: format!("{name}-supplier"),
            unit_rate,
            peak_time_multipliers: Vec::new(),
        }
    }

    fn meter_id(id: &str) -> MeterId {
        MeterId::from(id.to_string())
    }

    #[test]
    fn test_average_reading_rounds_half_up() {
        assert_eq!(average_reading(&readings()), Ok(dec!(1548.18)));
    }

    #[test]
    fn test_average_reading_of_nothing_fails() {
        assert_eq!(average_reading(&[]), Err(CostError::DivisionByZero));
    }

    #[test]
    fn test_elapsed_hours_between_earliest_and_latest() {
        // 44 551 047 seconds over the full span, despite the shuffled input.
        assert_eq!(elapsed_hours(&readings()).round_dp(12), dec!(12375.290833333333));
    }

    #[test]
    fn test_elapsed_hours_of_singleton_is_zero() {
        let singleton = [reading("2021-01-04T23:25:35Z", dec!(1))];
        assert_eq!(elapsed_hours(&singleton), Decimal::ZERO);
    }

    #[test]
    fn test_elapsed_hours_of_nothing_is_zero() {
        assert_eq!(elapsed_hours(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_consumption_cost() {
        let cost = consumption_cost(&readings(), &plan("fake-plan", dec!(0.5)));
        assert_eq!(cost, Ok(dec!(0.065)));
    }

    #[test]
    fn test_consumption_cost_of_single_reading_fails() {
        let singleton = [reading("2021-01-04T23:25:35Z", dec!(1))];
        let cost = consumption_cost(&singleton, &plan("fake-plan", dec!(0.5)));
        assert_eq!(cost, Err(CostError::DivisionByZero));
    }

    #[test]
    fn test_consumption_cost_of_simultaneous_readings_fails() {
        let simultaneous = [
            reading("2021-01-04T23:25:35Z", dec!(1)),
            reading("2021-01-04T23:25:35Z", dec!(2)),
        ];
        let cost = consumption_cost(&simultaneous, &plan("fake-plan", dec!(0.5)));
        assert_eq!(cost, Err(CostError::DivisionByZero));
    }

    #[test]
    fn test_costs_per_plan_ignores_peak_time_multipliers() -> Result<(), CostError> {
        let mut tuesday_half_price = plan("fake-plan-tuesday-half-price", dec!(1));
        tuesday_half_price.peak_time_multipliers.push(crate::plan::PeakTimeMultiplier {
            day_of_week: chrono::Weekday::Tue,
            multiplier: dec!(0.5),
        });
        let estimator = CostEstimator::new(
            vec![plan("fake-plan-1.1", dec!(1.1)), tuesday_half_price],
            InMemoryReadingStore::from_iter([(meter_id("smart-meter-0"), readings())]),
        );

        let costs = estimator.costs_per_plan(&meter_id("smart-meter-0"))?.unwrap();
        assert_eq!(costs.len(), 2);
        assert_eq!(costs["fake-plan-1.1"], dec!(0.143));
        // The Tuesday multiplier is present but inert.
        assert_eq!(costs["fake-plan-tuesday-half-price"], dec!(0.13));
        Ok(())
    }

    #[test]
    fn test_costs_per_plan_of_unknown_meter_is_absent() {
        let estimator = CostEstimator::new(
            vec![plan("fake-plan", dec!(1))],
            InMemoryReadingStore::from_iter([(meter_id("smart-meter-0"), readings())]),
        );
        assert_eq!(estimator.costs_per_plan(&meter_id("no-such-meter")), Ok(None));
    }

    #[test]
    fn test_costs_per_plan_of_known_meter_without_readings_fails() {
        let estimator = CostEstimator::new(
            vec![plan("fake-plan", dec!(1))],
            InMemoryReadingStore::from_iter([(meter_id("smart-meter-0"), Vec::new())]),
        );
        assert_eq!(
            estimator.costs_per_plan(&meter_id("smart-meter-0")),
            Err(CostError::DivisionByZero),
        );
    }

    #[test]
    fn test_costs_per_plan_has_one_entry_per_plan() -> Result<(), CostError> {
        let plans =
            vec![plan("plan-a", dec!(1)), plan("plan-b", dec!(2)), plan("plan-c", dec!(0))];
        let estimator = CostEstimator::new(
            plans,
            InMemoryReadingStore::from_iter([(meter_id("smart-meter-0"), readings())]),
        );
        let costs = estimator.costs_per_plan(&meter_id("smart-meter-0"))?.unwrap();
        assert_eq!(costs.len(), 3);
        for name in ["plan-a", "plan-b", "plan-c"] {
            assert!(costs.contains_key(name));
        }
        Ok(())
    }

    #[test]
    fn test_recommend_ranks_cheapest_first() -> Result<(), CostError> {
        let plans = vec![
            plan("pricey", dec!(10)),
            plan("cheap", dec!(1)),
            plan("middling", dec!(2)),
        ];
        let estimator = CostEstimator::new(
            plans,
            InMemoryReadingStore::from_iter([(meter_id("smart-meter-0"), readings())]),
        );

        let ranking = estimator.recommend(&meter_id("smart-meter-0"), None)?.unwrap();
        let names = ranking.iter().map(|(name, _)| name.as_str()).collect_vec();
        assert_eq!(names, ["cheap", "middling", "pricey"]);

        let limited = estimator.recommend(&meter_id("smart-meter-0"), Some(2))?.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0], ("cheap".to_string(), dec!(0.13)));
        Ok(())
    }
}
