use std::collections::HashSet;

use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::PayrollPolicy;
use crate::database::models::{
    MINUTES_PER_DAY, PaymentMethod, Salary, SalaryInput, WorkRecord, minute_of_day,
};
use crate::database::repositories::{
    ContractRepository, SalaryRepository, WorkRecordRepository, WorkplaceRepository,
};
use crate::database::types::Numeric;
use crate::database::utils::{clamped_day, shift_month};
use crate::error::{AppError, AppResult};
use crate::services::events::{EventLogger, entity, event_type};
use crate::services::holidays::{HolidayService, is_weekend};

/// Minute totals of one month's records, split into pay categories. The
/// categories are non-exclusive: a midnight-crossing holiday shift can
/// put the same minute into base, night and holiday at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinuteTotals {
    pub worked: i64,
    pub base: i64,
    pub overtime: i64,
    pub night: i64,
    pub holiday: i64,
}

/// Monthly wage computation: partitions worked time into differential
/// categories, applies the policy rates, deducts the statutory
/// percentages and persists the statement by replacement.
#[derive(Clone)]
pub struct PayrollService {
    contracts: ContractRepository,
    workplaces: WorkplaceRepository,
    work_records: WorkRecordRepository,
    salaries: SalaryRepository,
    holidays: HolidayService,
    events: EventLogger,
    policy: PayrollPolicy,
}

impl PayrollService {
    pub fn new(
        contracts: ContractRepository,
        workplaces: WorkplaceRepository,
        work_records: WorkRecordRepository,
        salaries: SalaryRepository,
        holidays: HolidayService,
        events: EventLogger,
        policy: PayrollPolicy,
    ) -> Self {
        Self {
            contracts,
            workplaces,
            work_records,
            salaries,
            holidays,
            events,
            policy,
        }
    }

    /// Compute and persist the statement for `(contract, year, month)`,
    /// replacing any earlier computation for the triple. A month with no
    /// records yields a zero statement. A month whose payment already
    /// reached a terminal state is closed and refused.
    pub async fn compute_salary(
        &self,
        contract_id: Uuid,
        year: i32,
        month: u32,
        method: PaymentMethod,
    ) -> AppResult<Salary> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(format!(
                "Month {} must be between 1 and 12",
                month
            )));
        }

        let contract = self
            .contracts
            .find_by_id(contract_id)
            .await?
            .ok_or_else(|| AppError::not_found("contract", contract_id))?;
        let workplace = self
            .workplaces
            .find_by_id(contract.workplace_id)
            .await?
            .ok_or_else(|| AppError::not_found("workplace", contract.workplace_id))?;

        let records = self
            .work_records
            .find_payable_for_month(contract_id, year, month)
            .await?;
        let holiday_dates: HashSet<NaiveDate> = self
            .holidays
            .holidays_for_month(year, month)
            .await?
            .into_iter()
            .map(|h| h.date)
            .collect();

        let is_premium_day = |date: NaiveDate| {
            holiday_dates.contains(&date) || (workplace.weekend_premium && is_weekend(date))
        };

        let mut totals = MinuteTotals::default();
        for record in &records {
            accumulate_record(
                &mut totals,
                record,
                &self.policy,
                workplace.under_five_employees,
                is_premium_day(record.work_date),
            );
        }

        let wage = contract.hourly_wage.inner();
        let one = BigDecimal::from(1);
        let base_pay = round_won(amount(wage, totals.base, &one));
        let overtime_pay = round_won(amount(wage, totals.overtime, &self.policy.overtime_multiplier));
        let night_pay = round_won(amount(wage, totals.night, &self.policy.night_premium_rate));
        let holiday_pay = round_won(amount(wage, totals.holiday, &self.policy.holiday_premium_rate));
        let gross_pay = &base_pay + &overtime_pay + &night_pay + &holiday_pay;

        let national_pension = floor_won(&gross_pay * &self.policy.national_pension_rate);
        let health_insurance = floor_won(&gross_pay * &self.policy.health_insurance_rate);
        let long_term_care = floor_won(&health_insurance * &self.policy.long_term_care_rate);
        let employment_insurance = floor_won(&gross_pay * &self.policy.employment_insurance_rate);
        let income_tax = floor_won(&gross_pay * &self.policy.income_tax_rate);
        let local_income_tax = floor_won(&income_tax * &self.policy.local_income_tax_rate);
        let total_deduction = &national_pension
            + &health_insurance
            + &long_term_care
            + &employment_insurance
            + &income_tax
            + &local_income_tax;
        let net_pay = &gross_pay - &total_deduction;

        let total_hours =
            (BigDecimal::from(totals.worked) / BigDecimal::from(60)).with_scale_round(2, RoundingMode::HalfUp);

        let (due_year, due_month) = shift_month(
            NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| AppError::Validation(format!("Invalid month {}-{:02}", year, month)))?,
            1,
        );
        let payment_due_date = clamped_day(due_year, due_month, contract.payment_day as u32)?;

        let input = SalaryInput {
            contract_id,
            year,
            month: month as i32,
            total_minutes: totals.worked,
            total_hours: Numeric(total_hours),
            base_pay: Numeric(base_pay),
            overtime_pay: Numeric(overtime_pay),
            night_pay: Numeric(night_pay),
            holiday_pay: Numeric(holiday_pay),
            gross_pay: Numeric(gross_pay),
            national_pension: Numeric(national_pension),
            health_insurance: Numeric(health_insurance),
            long_term_care: Numeric(long_term_care),
            employment_insurance: Numeric(employment_insurance),
            income_tax: Numeric(income_tax),
            local_income_tax: Numeric(local_income_tax),
            total_deduction: Numeric(total_deduction),
            net_pay: Numeric(net_pay),
            payment_due_date,
        };

        let (salary, _payment) = self
            .salaries
            .replace_for_month(input, method)
            .await?
            .ok_or_else(|| {
                AppError::InvalidState(format!(
                    "Salary for contract {} {}-{:02} is already settled",
                    contract_id, year, month
                ))
            })?;

        self.events
            .emit(
                event_type::SALARY_COMPUTED,
                entity::SALARY,
                salary.id,
                format!(
                    "Salary computed for contract {} {}-{:02}: net {}",
                    contract_id, year, month, salary.net_pay
                ),
                Some(EventLogger::metadata(vec![
                    ("contractId", contract_id.to_string()),
                    ("grossPay", salary.gross_pay.to_string()),
                    ("netPay", salary.net_pay.to_string()),
                    ("dueDate", salary.payment_due_date.to_string()),
                ])),
            )
            .await;

        Ok(salary)
    }
}

fn accumulate_record(
    totals: &mut MinuteTotals,
    record: &WorkRecord,
    policy: &PayrollPolicy,
    premium_exempt: bool,
    premium_day: bool,
) {
    let worked = record.worked_minutes();
    totals.worked += worked;

    // Workplaces under five employees pay straight time for everything:
    // no overtime, night or holiday differentials.
    if premium_exempt {
        totals.base += worked;
        return;
    }

    let base = worked.min(policy.daily_overtime_threshold_minutes);
    totals.base += base;
    totals.overtime += worked - base;

    let (start, end) = record.minute_span();
    totals.night += night_overlap_minutes(start, end, policy);

    if premium_day {
        totals.holiday += worked;
    }
}

/// Minutes of `[start, end)` (offsets from the work date's midnight, end
/// possibly beyond 24h) that fall inside the policy's night window. The
/// window is unfolded over two civil days so shifts crossing midnight
/// split correctly at the boundary.
pub fn night_overlap_minutes(start: i64, end: i64, policy: &PayrollPolicy) -> i64 {
    let ws = minute_of_day(policy.night_window_start);
    let we = minute_of_day(policy.night_window_end);

    let windows: Vec<(i64, i64)> = if we <= ws {
        // Window wraps midnight (the statutory 22:00-06:00 case).
        vec![
            (0, we),
            (ws, MINUTES_PER_DAY + we),
            (MINUTES_PER_DAY + ws, 2 * MINUTES_PER_DAY),
        ]
    } else {
        vec![(ws, we), (MINUTES_PER_DAY + ws, MINUTES_PER_DAY + we)]
    };

    windows
        .into_iter()
        .map(|(w_start, w_end)| (end.min(w_end) - start.max(w_start)).max(0))
        .sum()
}

fn amount(hourly_wage: &BigDecimal, minutes: i64, multiplier: &BigDecimal) -> BigDecimal {
    hourly_wage * BigDecimal::from(minutes) * multiplier / BigDecimal::from(60)
}

fn round_won(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::HalfUp)
}

fn floor_won(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(0, RoundingMode::Floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn span(start: NaiveTime, end: NaiveTime) -> (i64, i64) {
        let s = minute_of_day(start);
        let mut e = minute_of_day(end);
        if e <= s {
            e += MINUTES_PER_DAY;
        }
        (s, e)
    }

    #[test]
    fn day_shift_has_no_night_overlap() {
        let policy = PayrollPolicy::default();
        let (s, e) = span(t(9, 0), t(18, 0));
        assert_eq!(night_overlap_minutes(s, e, &policy), 0);
    }

    #[test]
    fn evening_shift_overlaps_window_start() {
        let policy = PayrollPolicy::default();
        // 18:00-23:30 touches the window for 90 minutes.
        let (s, e) = span(t(18, 0), t(23, 30));
        assert_eq!(night_overlap_minutes(s, e, &policy), 90);
    }

    #[test]
    fn midnight_crossing_shift_splits_at_boundary() {
        let policy = PayrollPolicy::default();
        // 20:00-02:00: 22:00-02:00 inside the window.
        let (s, e) = span(t(20, 0), t(2, 0));
        assert_eq!(night_overlap_minutes(s, e, &policy), 240);
    }

    #[test]
    fn overnight_shift_through_window_end() {
        let policy = PayrollPolicy::default();
        // 23:00-08:00: 23:00-06:00 is night, 06:00-08:00 is not.
        let (s, e) = span(t(23, 0), t(8, 0));
        assert_eq!(night_overlap_minutes(s, e, &policy), 7 * 60);
    }

    #[test]
    fn shift_ending_at_window_start_earns_nothing() {
        let policy = PayrollPolicy::default();
        // 18:00-22:00 ends exactly where the window begins.
        let (s, e) = span(t(18, 0), t(22, 0));
        assert_eq!(night_overlap_minutes(s, e, &policy), 0);
    }

    #[test]
    fn amount_scales_by_minutes_and_multiplier() {
        let wage = BigDecimal::from(10000);
        let ot = BigDecimal::from_str("1.5").unwrap();
        // 90 minutes at 1.5x of 10,000/h = 22,500.
        assert_eq!(
            round_won(amount(&wage, 90, &ot)),
            BigDecimal::from(22500).with_scale(0)
        );
    }

    #[test]
    fn rounding_half_up_and_floor() {
        let half = BigDecimal::from_str("100.5").unwrap();
        assert_eq!(round_won(half.clone()), BigDecimal::from(101).with_scale(0));
        assert_eq!(floor_won(half), BigDecimal::from(100).with_scale(0));
    }
}
