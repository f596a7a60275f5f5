pub mod balance_mapper;
pub mod expenditure_mapper;

pub use balance_mapper::BalanceMapper;
pub use expenditure_mapper::ExpenditureMapper;
