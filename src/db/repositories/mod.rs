mod feedback;
mod prediction_logs;
mod users;
