pub mod p900_daily_revenue;
