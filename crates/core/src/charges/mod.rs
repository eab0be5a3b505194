//! Monthly charges: allocation, regeneration and confirmation.

mod charge_allocator;
mod charges_model;
mod charges_service;
mod charges_traits;
mod period_charge_builder;


pub use charge_allocator::{
    allocate_actual, allocate_pro_rata, chargeable_days, Allocation, PlannedCharge,
};
pub use charges_model::{
    charge_description, BillingPeriod, ChargeLine, ChargeStatus, MonthlyCharge, NewMonthlyCharge,
};
pub use charges_service::ChargesService;
pub use charges_traits::{ChargeRepositoryTrait, ChargesServiceTrait};
pub use period_charge_builder::{
    is_chargeable_in, plan_period_charges, ChargePlan, PeriodSnapshot, ProjectChargingInput,
    TimeEntryLink,
};
