pub mod customer;
pub mod employee;
pub mod employee_type;
pub mod pet;
pub mod user;

pub use customer::Customer;
pub use employee::Employee;
pub use employee_type::EmployeeType;
pub use pet::Pet;
pub use user::User;
