mod access_flows;
