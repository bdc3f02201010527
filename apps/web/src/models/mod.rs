pub mod application;
pub mod company;
pub mod specialty;
pub mod user;
pub mod vacancy;

pub use application::{Application, ApplicationData};
pub use company::{Company, CompanyData, CompanyWithCount};
pub use specialty::{Specialty, SpecialtyWithCount};
pub use user::User;
pub use vacancy::{Vacancy, VacancyData, VacancyListing};
