mod helpers;
mod test_auth_guards;
mod test_smoke_flows;
