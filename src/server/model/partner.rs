//! Partner domain models, rating aggregation and availability checks.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::{
    model::{
        enums::{PartnerType, PlanType, ShootType, Weekday},
        partner::{
            AvailabilityDto, BlackoutDateDto, CreatePartnerDto, DateAvailabilityDto,
            DayScheduleDto, EarningsDto, LocationDto, PackageDto, PartnerDto, PartnerSummaryDto,
            CreateReviewDto, RatingBreakdownDto, RatingsDto, ReviewDto, TransactionDto,
            UpdatePartnerDto,
        },
    },
    server::{
        error::AppError,
        model::{
            client::{validate_account_fields, Address},
            parse_json_column, parse_stored,
        },
        util::validate::Validator,
    },
};

/// Rating aggregate kept on the partner row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ratings {
    pub average: f64,
    pub total: i32,
    /// Counts of five, four, three, two and one star reviews.
    pub breakdown: [i32; 5],
}

impl Ratings {
    /// Recomputes the aggregate from every review rating (1 to 5).
    ///
    /// The average is rounded to one decimal place.
    pub fn from_reviews(ratings: &[i32]) -> Self {
        let mut breakdown = [0; 5];
        for rating in ratings {
            breakdown[(5 - (*rating).clamp(1, 5)) as usize] += 1;
        }

        let total = ratings.len() as i32;
        let average = if total == 0 {
            0.0
        } else {
            let sum: i32 = ratings.iter().map(|r| (*r).clamp(1, 5)).sum();
            (sum as f64 / total as f64 * 10.0).round() / 10.0
        };

        Self {
            average,
            total,
            breakdown,
        }
    }

    pub fn into_dto(self) -> RatingsDto {
        let [five, four, three, two, one] = self.breakdown;
        RatingsDto {
            average: self.average,
            total_reviews: self.total,
            breakdown: RatingBreakdownDto {
                five,
                four,
                three,
                two,
                one,
            },
        }
    }
}

/// Child rows loaded alongside a partner.
#[derive(Debug, Clone, Default)]
pub struct PartnerChildren {
    pub shoot_types: Vec<entity::partner_shoot_type::Model>,
    pub specializations: Vec<entity::partner_specialization::Model>,
    pub locations: Vec<entity::partner_location::Model>,
    pub packages: Vec<entity::partner_package::Model>,
    pub blackout_dates: Vec<entity::partner_blackout_date::Model>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Partner {
    pub id: i32,
    pub partner_code: String,
    pub identity_uid: Option<String>,
    pub username: String,
    pub company_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub phone_no: String,
    pub profile_pic: Option<String>,
    pub banner_image: Option<String>,
    pub address: Address,
    pub years_of_experience: Option<i32>,
    pub plan_type: PlanType,
    pub partner_type: PartnerType,
    pub shoot_types: Vec<ShootType>,
    pub specializations: Vec<String>,
    pub locations: Vec<LocationDto>,
    pub packages: Vec<PackageDto>,
    pub price_per_day: Option<f64>,
    pub ratings: Ratings,
    pub verified: bool,
    pub schedule: Vec<DayScheduleDto>,
    pub blackout_dates: Vec<BlackoutDateDto>,
    pub timezone: Option<String>,
    pub total_revenue: f64,
    pub transactions: Vec<TransactionDto>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partner {
    /// Converts a partner row and its child rows into the domain model.
    ///
    /// # Returns
    /// - `Ok(Partner)` - The converted domain model
    /// - `Err(AppError::InternalError)` - A stored enum value or JSON column is malformed
    pub fn from_entity(
        entity: entity::partner::Model,
        children: PartnerChildren,
    ) -> Result<Self, AppError> {
        let shoot_types = children
            .shoot_types
            .iter()
            .map(|s| parse_stored("shoot_type", &s.shoot_type))
            .collect::<Result<Vec<ShootType>, _>>()?;

        let packages = children
            .packages
            .into_iter()
            .map(|p| {
                Ok(PackageDto {
                    id: Some(p.id),
                    name: p.name,
                    description: p.description,
                    price: p.price,
                    duration: p.duration,
                    inclusions: parse_json_column("inclusions", p.inclusions)?,
                    is_active: p.is_active,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            id: entity.id,
            partner_code: entity.partner_code,
            identity_uid: entity.identity_uid,
            username: entity.username,
            company_name: entity.company_name,
            email: entity.email,
            password_hash: entity.password_hash,
            phone_no: entity.phone_no,
            profile_pic: entity.profile_pic_url,
            banner_image: entity.banner_url,
            address: Address {
                street: entity.street,
                city: entity.city,
                state: entity.state,
                country: entity.country,
                zip_code: entity.zip_code,
            },
            years_of_experience: entity.years_of_experience,
            plan_type: parse_stored("plan_type", &entity.plan_type)?,
            partner_type: parse_stored("partner_type", &entity.partner_type)?,
            shoot_types,
            specializations: children
                .specializations
                .into_iter()
                .map(|s| s.name)
                .collect(),
            locations: children
                .locations
                .into_iter()
                .map(|l| LocationDto {
                    city: l.city,
                    state: l.state,
                    country: l.country,
                    service_radius: l.service_radius,
                    travel_charges: l.travel_charges,
                })
                .collect(),
            packages,
            price_per_day: entity.price_per_day,
            ratings: Ratings {
                average: entity.rating_average,
                total: entity.rating_total,
                breakdown: [
                    entity.rating_five,
                    entity.rating_four,
                    entity.rating_three,
                    entity.rating_two,
                    entity.rating_one,
                ],
            },
            verified: entity.verified,
            schedule: parse_json_column("availability_schedule", entity.availability_schedule)?,
            blackout_dates: children
                .blackout_dates
                .into_iter()
                .map(|b| BlackoutDateDto {
                    date: b.date,
                    reason: b.reason,
                })
                .collect(),
            timezone: entity.timezone,
            total_revenue: entity.total_revenue,
            transactions: parse_json_column("transactions", entity.transactions)?,
            is_active: entity.is_active,
            last_login: entity.last_login,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts to the API representation; earnings are only attached when requested.
    pub fn into_dto(self, include_earnings: bool) -> PartnerDto {
        let earnings = include_earnings.then(|| EarningsDto {
            total_revenue: self.total_revenue,
            transactions: self.transactions,
        });

        PartnerDto {
            id: self.id,
            partner_id: self.partner_code,
            username: self.username,
            company_name: self.company_name,
            email: self.email,
            phone_no: self.phone_no,
            profile_pic: self.profile_pic,
            banner_image: self.banner_image,
            address: self.address.into_dto(),
            years_of_experience: self.years_of_experience,
            plan_type: self.plan_type,
            partner_type: self.partner_type,
            shoot_types: self.shoot_types,
            specializations: self.specializations,
            locations: self.locations,
            packages: self.packages,
            price_per_day: self.price_per_day,
            ratings: self.ratings.into_dto(),
            verified: self.verified,
            availability: AvailabilityDto {
                schedule: self.schedule,
                blackout_dates: self.blackout_dates,
                timezone: self.timezone,
            },
            earnings,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_summary(self) -> PartnerSummaryDto {
        PartnerSummaryDto {
            id: self.id,
            partner_id: self.partner_code,
            username: self.username,
            company_name: self.company_name,
            profile_pic: self.profile_pic,
            price_per_day: self.price_per_day,
            ratings: self.ratings.into_dto(),
            verified: self.verified,
        }
    }

    pub fn is_blacked_out(&self, date: NaiveDate) -> bool {
        self.blackout_dates.iter().any(|b| b.date == date)
    }

    /// A day is bookable when it is not blacked out and the weekly schedule, if it lists
    /// that weekday, marks it available.
    pub fn availability_on(&self, date: NaiveDate) -> DateAvailabilityDto {
        let weekday = weekday_of(date);
        let schedule = self.schedule.iter().find(|d| d.day == weekday).cloned();
        let open = schedule.as_ref().is_none_or(|d| d.is_available);

        DateAvailabilityDto {
            date,
            available: open && !self.is_blacked_out(date),
            schedule,
        }
    }

    /// Weekly schedule with blackout dates, optionally narrowed to one `(year, month)`.
    pub fn calendar(self, month: Option<(i32, u32)>) -> AvailabilityDto {
        let blackout_dates = self
            .blackout_dates
            .into_iter()
            .filter(|b| month.is_none_or(|(y, m)| b.date.year() == y && b.date.month() == m))
            .collect();

        AvailabilityDto {
            schedule: self.schedule,
            blackout_dates,
            timezone: self.timezone,
        }
    }
}

fn weekday_of(date: NaiveDate) -> Weekday {
    match date.weekday() {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}

/// Parses a `YYYY-MM` month selector.
pub fn parse_month(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year = year.parse().ok()?;
    let month = month.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatePartnerParams {
    pub username: String,
    pub company_name: String,
    pub email: String,
    pub password: Option<String>,
    pub phone_no: String,
    pub address: Address,
    pub years_of_experience: Option<i32>,
    pub partner_type: PartnerType,
    pub plan_type: PlanType,
    pub shoot_types: Vec<ShootType>,
    pub specializations: Vec<String>,
    pub locations: Vec<LocationDto>,
    pub packages: Vec<PackageDto>,
    pub price_per_day: Option<f64>,
    pub identity_uid: Option<String>,
}

fn validate_profile_numbers(
    v: &mut Validator,
    years_of_experience: Option<i32>,
    price_per_day: Option<f64>,
    packages: Option<&[PackageDto]>,
) {
    v.range("yearsOfExperience", years_of_experience.map(f64::from), 0.0, 50.0);
    v.range("pricePerDay", price_per_day, 0.0, f64::MAX);
    if packages.is_some_and(|p| p.iter().any(|p| !p.price.is_finite() || p.price < 0.0)) {
        v.push("packages", "package prices must be >= 0");
    }
}

impl CreatePartnerParams {
    pub fn from_dto(dto: CreatePartnerDto) -> Result<Self, AppError> {
        let mut v = Validator::new();
        validate_account_fields(&mut v, &dto.username, &dto.email, &dto.phone_no);
        v.length("companyName", &dto.company_name, 1, 100);
        v.length("password", &dto.password, 6, 128);
        if dto.shoot_types.is_empty() {
            v.push("shootTypes", "at least one shoot type is required");
        }
        validate_profile_numbers(
            &mut v,
            dto.years_of_experience,
            dto.price_per_day,
            Some(&dto.packages),
        );
        v.finish()?;

        Ok(Self {
            username: dto.username.trim().to_string(),
            company_name: dto.company_name.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            password: Some(dto.password),
            phone_no: dto.phone_no.trim().to_string(),
            address: dto.address.map(Address::from_dto).unwrap_or_default(),
            years_of_experience: dto.years_of_experience,
            partner_type: dto.partner_type.unwrap_or_default(),
            plan_type: dto.plan_type.unwrap_or_default(),
            shoot_types: dedup(dto.shoot_types),
            specializations: dto.specializations,
            locations: dto.locations,
            packages: dto.packages,
            price_per_day: dto.price_per_day,
            identity_uid: None,
        })
    }
}

fn dedup(mut shoot_types: Vec<ShootType>) -> Vec<ShootType> {
    let mut seen = Vec::with_capacity(shoot_types.len());
    shoot_types.retain(|s| {
        let fresh = !seen.contains(s);
        seen.push(*s);
        fresh
    });
    shoot_types
}

/// Partial partner update. Child collections, when present, replace the stored rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePartnerParams {
    pub username: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub profile_pic: Option<String>,
    pub banner_image: Option<String>,
    pub address: Option<Address>,
    pub years_of_experience: Option<i32>,
    pub partner_type: Option<PartnerType>,
    pub plan_type: Option<PlanType>,
    pub shoot_types: Option<Vec<ShootType>>,
    pub specializations: Option<Vec<String>>,
    pub locations: Option<Vec<LocationDto>>,
    pub packages: Option<Vec<PackageDto>>,
    pub price_per_day: Option<f64>,
    pub schedule: Option<Vec<DayScheduleDto>>,
    pub blackout_dates: Option<Vec<BlackoutDateDto>>,
    pub timezone: Option<String>,
    pub verified: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdatePartnerParams {
    /// Validates an update. `verified` and `is_active` are dropped unless `allow_admin_fields`.
    pub fn from_dto(dto: UpdatePartnerDto, allow_admin_fields: bool) -> Result<Self, AppError> {
        let mut v = Validator::new();
        if let Some(username) = &dto.username {
            v.length("username", username, 3, 30);
        }
        if let Some(email) = &dto.email {
            v.email("email", email);
        }
        if let Some(phone_no) = &dto.phone_no {
            v.phone("phoneNo", phone_no);
        }
        if dto.shoot_types.as_ref().is_some_and(Vec::is_empty) {
            v.push("shootTypes", "at least one shoot type is required");
        }
        validate_profile_numbers(
            &mut v,
            dto.years_of_experience,
            dto.price_per_day,
            dto.packages.as_deref(),
        );
        v.finish()?;

        Ok(Self {
            username: dto.username.map(|u| u.trim().to_string()),
            company_name: dto.company_name,
            email: dto.email.map(|e| e.trim().to_lowercase()),
            phone_no: dto.phone_no,
            profile_pic: dto.profile_pic,
            banner_image: dto.banner_image,
            address: dto.address.map(Address::from_dto),
            years_of_experience: dto.years_of_experience,
            partner_type: dto.partner_type,
            plan_type: dto.plan_type,
            shoot_types: dto.shoot_types.map(dedup),
            specializations: dto.specializations,
            locations: dto.locations,
            packages: dto.packages,
            price_per_day: dto.price_per_day,
            schedule: dto.schedule,
            blackout_dates: dto.blackout_dates,
            timezone: dto.timezone,
            verified: dto.verified.filter(|_| allow_admin_fields),
            is_active: dto.is_active.filter(|_| allow_admin_fields),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub partner_id: i32,
    pub client_id: i32,
    pub order_id: Option<i32>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn from_entity(entity: entity::partner_review::Model) -> Self {
        Self {
            id: entity.id,
            partner_id: entity.partner_id,
            client_id: entity.client_id,
            order_id: entity.order_id,
            rating: entity.rating,
            comment: entity.comment,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            partner_id: self.partner_id,
            client_id: self.client_id,
            order_id: self.order_id,
            rating: self.rating,
            comment: self.comment,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateReviewParams {
    pub partner_id: i32,
    pub client_id: i32,
    pub order_id: Option<i32>,
    pub rating: i32,
    pub comment: Option<String>,
}

impl CreateReviewParams {
    /// Validates a review: rating 1 to 5, comment at most 1000 characters.
    pub fn from_dto(dto: CreateReviewDto, partner_id: i32, client_id: i32) -> Result<Self, AppError> {
        let mut v = Validator::new();
        if !(1..=5).contains(&dto.rating) {
            v.push("rating", "must be an integer between 1 and 5");
        }
        v.max_length("comment", dto.comment.as_deref(), 1000);
        v.finish()?;

        Ok(Self {
            partner_id,
            client_id,
            order_id: dto.order_id,
            rating: dto.rating,
            comment: dto.comment.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
        })
    }
}
