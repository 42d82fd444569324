mod client;
mod order;
mod partner;
mod review;
