use chrono::NaiveDate;
use pi_capacity_planner::capacity::working_days;
use pi_capacity_planner::{
    DayPart, Employee, HolidayResolver, OffDayDetail, OffDaySpan, PiConfig, PiConfigError, PiPlan,
    PublicHoliday, Role, Team,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const EPS: f64 = 1e-9;

/// Two-member team over an arbitrary window.
fn base_plan(start: NaiveDate, end: NaiveDate) -> PiPlan {
    let mut plan = PiPlan::with_config(PiConfig::new("PI-7", start, end));
    plan.organization
        .upsert_employee(Employee::new("ada", "Ada", Role::Developer, 8.0, 10))
        .unwrap();
    plan.organization
        .upsert_employee(Employee::new("grace", "Grace", Role::Tester, 6.0, 8))
        .unwrap();
    let mut team = Team::new("falcon", "Falcon");
    team.member_ids = vec!["ada".to_string(), "grace".to_string()];
    plan.organization.upsert_team(team);
    plan
}

/// Monday 2024-03-04 through Friday 2024-03-08.
fn week_plan() -> PiPlan {
    base_plan(d(2024, 3, 4), d(2024, 3, 8))
}

#[test]
fn full_public_holiday_removes_the_day_for_the_whole_roster() {
    let mut plan = week_plan();
    // Wednesday of the fixture week
    plan.add_public_holiday(PublicHoliday::new("h1", "Founders Day", d(2024, 3, 6)));

    let summary = plan.pi_summary().unwrap();
    assert_eq!(summary.total_days, 5);
    assert_eq!(summary.working_days, 4);
    assert_eq!(summary.iteration_count, 1);
    assert_eq!(summary.team_count, 1);
    assert_eq!(summary.employee_count, 2);
    assert!((summary.total_hours - 56.0).abs() < EPS);
    assert_eq!(summary.total_sp, 18);

    let team = plan.team_capacity("falcon").unwrap().unwrap();
    assert_eq!(team.member_count, 2);
    assert_eq!(team.working_days, 4);
    assert_eq!(team.off_days, 2);
    assert!((team.total_hours - 56.0).abs() < EPS);
    assert_eq!(team.sp_per_iteration, 18);
    // flat SP never shrinks with holidays
    assert_eq!(team.total_sp, 18);

    // the adjusted figure does: 10 * 4/5 + 8 * 4/5
    let iterations = plan.iteration_schedule(&["falcon"]).unwrap();
    assert_eq!(iterations.len(), 1);
    assert_eq!(iterations[0].working_days, 4);
    assert_eq!(iterations[0].off_days, 2);
    assert!((iterations[0].total_sp - 14.4).abs() < EPS);
}

#[test]
fn half_day_public_holiday_costs_half_a_day_per_member() {
    let mut plan = week_plan();
    plan.add_public_holiday(PublicHoliday::new("h1", "Founders Day", d(2024, 3, 6)).half_day());

    // 4.5 averaged over both members rounds up to 5
    let team = plan.team_capacity("falcon").unwrap().unwrap();
    assert_eq!(team.working_days, 5);
    assert_eq!(team.off_days, 2);

    // the PI-level count excludes the whole day whatever the day part
    assert_eq!(plan.pi_summary().unwrap().working_days, 4);

    // adjusted SP sits strictly between the full-holiday and free-week figures
    let detail = plan.iteration_detail(1, &["falcon"]).unwrap().unwrap();
    let ada = &detail.members[0];
    assert_eq!(ada.employee_id, "ada");
    assert!((ada.working_days - 4.5).abs() < EPS);
    assert_eq!(ada.adjusted_sp, 9);
    assert!(ada.adjusted_sp > 8 && ada.adjusted_sp < 10);
}

#[test]
fn off_days_tally_per_member_and_attribute_one_holiday_per_day() {
    let mut plan = week_plan();
    plan.organization
        .add_team_off_span(&["falcon"], &OffDaySpan::new("offsite", d(2024, 3, 7), d(2024, 3, 7)))
        .unwrap();
    plan.organization
        .add_personal_off_span(
            "ada",
            &OffDaySpan::new("vac", d(2024, 3, 5), d(2024, 3, 5)).with_reason("Vacation"),
        )
        .unwrap();
    // overlaps the team offsite; the team record governs that day
    plan.organization
        .add_personal_off_span(
            "ada",
            &OffDaySpan::new("clash", d(2024, 3, 7), d(2024, 3, 7)).with_reason("Clash"),
        )
        .unwrap();

    // ada loses Tuesday and Thursday, grace only Thursday
    let team = plan.team_capacity("falcon").unwrap().unwrap();
    assert_eq!(team.off_days, 3);

    let (start, end) = plan.config.window().unwrap();
    let entries = plan
        .engine()
        .member_off_days("ada", start, end, &["falcon"]);
    assert_eq!(
        entries,
        vec![
            OffDayDetail {
                date: d(2024, 3, 5),
                reason: "Vacation".to_string(),
                day_part: DayPart::Full,
            },
            OffDayDetail {
                date: d(2024, 3, 7),
                reason: "Team Off".to_string(),
                day_part: DayPart::Full,
            },
        ]
    );
}

#[test]
fn combined_views_deduplicate_shared_members() {
    let mut plan = week_plan();
    plan.organization
        .upsert_employee(Employee::new("petra", "Petra", Role::ProductOwner, 8.0, 3))
        .unwrap();
    plan.organization.assign_member("falcon", "petra").unwrap();
    let mut heron = Team::new("heron", "Heron");
    heron.member_ids = vec!["petra".to_string()];
    let skipped = plan.organization.upsert_team(heron);
    assert!(skipped.is_empty());

    let falcon = plan.iteration_schedule(&["falcon"]).unwrap();
    let heron = plan.iteration_schedule(&["heron"]).unwrap();
    assert_eq!(falcon[0].member_count, 3);
    assert_eq!(heron[0].member_count, 1);

    // petra appears once in the combined view, not once per team
    let combined = plan.iteration_schedule(&["falcon", "heron"]).unwrap();
    assert_eq!(combined[0].member_count, 3);
    assert!((combined[0].total_sp - 21.0).abs() < EPS);

    // an empty selection covers every team
    let everyone = plan.iteration_schedule(&[]).unwrap();
    assert_eq!(everyone[0].member_count, 3);
}

#[test]
fn teamless_employees_count_toward_pi_totals() {
    let mut plan = week_plan();
    plan.organization
        .upsert_employee(Employee::new("zoe", "Zoe", Role::Developer, 7.0, 5))
        .unwrap();
    plan.organization
        .add_team_off_span(&["falcon"], &OffDaySpan::new("offsite", d(2024, 3, 7), d(2024, 3, 7)))
        .unwrap();

    let summary = plan.pi_summary().unwrap();
    assert_eq!(summary.employee_count, 3);
    assert!((summary.total_hours - 21.0 * 5.0).abs() < EPS);
    assert_eq!(summary.total_sp, 23);

    // team membership is what exposes a member to team leave
    let holidays = plan.organization.holidays(&plan.public_holidays);
    let resolver = HolidayResolver::new(&holidays);
    let zoe = plan.organization.employee("zoe").unwrap();
    let worked =
        working_days::member_working_days(&resolver, d(2024, 3, 4), d(2024, 3, 8), &[], zoe);
    assert_eq!(worked, 5.0);

    let team = plan.team_capacity("falcon").unwrap().unwrap();
    assert_eq!(team.member_count, 2);
    assert_eq!(team.working_days, 4);
}

#[test]
fn empty_roster_yields_zero_valued_summaries() {
    let plan = PiPlan::with_config(PiConfig::new("PI-0", d(2024, 3, 4), d(2024, 3, 8)));

    let summary = plan.pi_summary().unwrap();
    assert_eq!(summary.team_count, 0);
    assert_eq!(summary.employee_count, 0);
    assert_eq!(summary.working_days, 5);
    assert_eq!(summary.total_hours, 0.0);
    assert_eq!(summary.total_sp, 0);

    assert!(plan.team_capacities().unwrap().is_empty());

    let iterations = plan.iteration_schedule(&[]).unwrap();
    assert_eq!(iterations.len(), 1);
    assert_eq!(iterations[0].member_count, 0);
    assert_eq!(iterations[0].working_days, 0);
    assert_eq!(iterations[0].off_days, 0);
    assert_eq!(iterations[0].total_hours, 0.0);
    assert_eq!(iterations[0].total_sp, 0.0);
}

#[test]
fn unconfigured_window_surfaces_from_every_query() {
    let mut plan = PiPlan::new();
    plan.organization
        .upsert_employee(Employee::new("ada", "Ada", Role::Developer, 8.0, 10))
        .unwrap();

    assert!(matches!(
        plan.pi_summary().expect_err("no window"),
        PiConfigError::NotConfigured
    ));
    assert!(matches!(
        plan.team_capacities().expect_err("no window"),
        PiConfigError::NotConfigured
    ));
    assert!(matches!(
        plan.iteration_schedule(&[]).expect_err("no window"),
        PiConfigError::NotConfigured
    ));
}

#[test]
fn role_breakdown_is_sorted_and_keeps_raw_adjusted_sp() {
    let mut plan = PiPlan::with_config(PiConfig::new("PI-8", d(2024, 1, 1), d(2024, 1, 14)));
    for (id, name, role, sp) in [
        ("dev1", "Dana", Role::Developer, 5),
        ("dev2", "Devi", Role::Developer, 5),
        ("tess", "Tess", Role::Tester, 7),
        ("petra", "Petra", Role::ProductOwner, 3),
    ] {
        plan.organization
            .upsert_employee(Employee::new(id, name, role, 8.0, sp))
            .unwrap();
    }
    let mut team = Team::new("falcon", "Falcon");
    team.member_ids = ["dev1", "dev2", "tess", "petra"]
        .iter()
        .map(|id| id.to_string())
        .collect();
    plan.organization.upsert_team(team);
    plan.organization
        .add_personal_off_span(
            "dev2",
            &OffDaySpan::new("errand", d(2024, 1, 2), d(2024, 1, 2)).half_day(),
        )
        .unwrap();

    let detail = plan.iteration_detail(1, &[]).unwrap().unwrap();

    // 10 weekdays in the iteration; dev2 works 9.5 of them
    let dev2 = &detail.members[1];
    assert_eq!(dev2.employee_id, "dev2");
    assert!((dev2.working_days - 9.5).abs() < EPS);
    // 4.75 raw, rounded for the member row
    assert_eq!(dev2.adjusted_sp, 5);
    assert_eq!(
        dev2.off_days,
        vec![OffDayDetail {
            date: d(2024, 1, 2),
            reason: "Personal Leave".to_string(),
            day_part: DayPart::Half,
        }]
    );

    let role_names: Vec<&str> = detail.roles.iter().map(|r| r.role.as_str()).collect();
    assert_eq!(role_names, vec!["Developer", "Product Owner", "Tester"]);

    let developers = &detail.roles[0];
    assert_eq!(developers.member_count, 2);
    // the role keeps the unrounded sum: 5.0 + 4.75
    assert!((developers.adjusted_sp - 9.75).abs() < EPS);
    assert!((developers.hours - 156.0).abs() < EPS);

    // summary working days: mean of 10, 9.5, 10, 10 rounds back to 10
    assert_eq!(detail.summary.working_days, 10);
    assert_eq!(detail.summary.off_days, 1);
    assert!((detail.summary.total_sp - 19.75).abs() < EPS);
}

#[test]
fn iteration_detail_is_none_for_an_unknown_number() {
    let plan = week_plan();
    assert!(plan.iteration_detail(9, &[]).unwrap().is_none());
}

#[test]
fn repeated_queries_over_one_snapshot_agree() {
    // twelve members with staggered half and full day leave; the adjusted
    // terms are inexact, so any summation order drift would show in the totals
    let mut plan = PiPlan::with_config(PiConfig::new("PI-11", d(2024, 1, 1), d(2024, 1, 14)));
    let mut team = Team::new("falcon", "Falcon");
    for (i, sp) in [7, 13, 21, 29, 37, 41, 53, 61, 73, 83, 91, 97]
        .into_iter()
        .enumerate()
    {
        let id = format!("m{i}");
        plan.organization
            .upsert_employee(Employee::new(&id, format!("Member {i}"), Role::Developer, 7.5, sp))
            .unwrap();
        team.member_ids.push(id);
    }
    plan.organization.upsert_team(team);
    for i in 0..12u32 {
        let day = d(2024, 1, 1 + i % 5);
        plan.organization
            .add_personal_off_span(
                &format!("m{i}"),
                &OffDaySpan::new(format!("half{i}"), day, day).half_day(),
            )
            .unwrap();
        if i % 2 == 1 {
            let day = d(2024, 1, 8 + i % 5);
            plan.organization
                .add_personal_off_span(&format!("m{i}"), &OffDaySpan::new(format!("full{i}"), day, day))
                .unwrap();
        }
    }

    assert_eq!(plan.pi_summary().unwrap(), plan.pi_summary().unwrap());
    assert_eq!(
        plan.team_capacities().unwrap(),
        plan.team_capacities().unwrap()
    );
    assert_eq!(
        plan.iteration_schedule(&[]).unwrap(),
        plan.iteration_schedule(&[]).unwrap()
    );
    assert_eq!(
        plan.iteration_detail(1, &[]).unwrap(),
        plan.iteration_detail(1, &[]).unwrap()
    );

    // the adjusted total folds in member order over the 10 weekdays
    let holidays = plan.organization.holidays(&plan.public_holidays);
    let resolver = HolidayResolver::new(&holidays);
    let expected: f64 = plan
        .organization
        .employees
        .iter()
        .map(|member| {
            let worked = working_days::member_working_days(
                &resolver,
                d(2024, 1, 1),
                d(2024, 1, 14),
                &["falcon"],
                member,
            );
            member.sp_capacity as f64 * (worked / 10.0)
        })
        .sum();
    assert_eq!(plan.iteration_schedule(&[]).unwrap()[0].total_sp, expected);
}

#[test]
fn multi_iteration_window_multiplies_flat_sp() {
    let plan = base_plan(d(2024, 1, 1), d(2024, 1, 28));

    let summary = plan.pi_summary().unwrap();
    assert_eq!(summary.total_days, 28);
    assert_eq!(summary.working_days, 20);
    assert_eq!(summary.iteration_count, 2);
    assert!((summary.total_hours - 280.0).abs() < EPS);
    assert_eq!(summary.total_sp, 36);

    let team = plan.team_capacity("falcon").unwrap().unwrap();
    assert_eq!(team.working_days, 20);
    assert_eq!(team.total_sp, 36);
}
