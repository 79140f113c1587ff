mod test_geofence;
