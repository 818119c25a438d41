//! Rolling 31-day salary cycle calculations for employees.

pub mod cycle;

#[cfg(test)]
mod cycle_props;

pub use cycle::{
    CYCLE_LENGTH_DAYS, CycleWindow, EmployeeProfile, SalaryCycle, SalaryStatus, current_window,
    salary_cycle,
};
