use crate::domain::models::{ExpenditureRecord, NewExpenditure, ValidationError};
use shared::{CreateExpenditureRequest, CreateExpenditureResponse, Expenditure as SharedExpenditure};

pub struct ExpenditureMapper;

impl ExpenditureMapper {
    pub fn to_new_expenditure(dto: &CreateExpenditureRequest) -> Result<NewExpenditure, ValidationError> {
        NewExpenditure::parse(
            dto.child.as_deref(),
            dto.amount,
            dto.description.as_deref(),
            dto.date.as_deref(),
        )
    }

    pub fn to_dto(domain: ExpenditureRecord) -> SharedExpenditure {
        SharedExpenditure {
            child: domain.child_id,
            amount: domain.amount,
            date: domain.date,
            description: domain.description,
            recorded_at: domain.recorded_at,
        }
    }

    pub fn to_create_response(domain: ExpenditureRecord) -> CreateExpenditureResponse {
        let message = format!("Recorded {} spent by {}", domain.amount, domain.child_id);
        CreateExpenditureResponse {
            message,
            expenditure: Self::to_dto(domain),
        }
    }
}
